//! Transaction (ledger entry) model and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Borrow,
    Return,
    Reservation,
    CancelReservation,
}

/// Lifecycle state. A borrow entry is `Active` from creation until the
/// book comes back, then `Completed`; entries are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    Completed,
}

/// A single ledger entry. Mutated in place on return (returned_at set,
/// fine computed, status closed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fine_amount: f64,
    pub status: TransactionStatus,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn borrow(user_id: &str, book_id: &str, due_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            kind: TransactionKind::Borrow,
            created_at: Utc::now(),
            due_date: Some(due_date),
            returned_at: None,
            fine_amount: 0.0,
            status: TransactionStatus::Active,
            notes: String::new(),
        }
    }

    /// Closed ledger entry recording a reservation event (no due date,
    /// no fine).
    pub fn event(user_id: &str, book_id: &str, kind: TransactionKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            kind,
            created_at: Utc::now(),
            due_date: None,
            returned_at: None,
            fine_amount: 0.0,
            status: TransactionStatus::Completed,
            notes: String::new(),
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match (self.due_date, self.returned_at) {
            (Some(due), None) => now > due,
            _ => false,
        }
    }

    /// Fine owed at `returned_at`: whole days past the due date times the
    /// flat daily rate, zero when on time or early.
    pub fn calculate_fine(&self, fine_per_day: f64) -> f64 {
        match (self.due_date, self.returned_at) {
            (Some(due), Some(returned)) if returned > due => {
                (returned - due).num_days().max(0) as f64 * fine_per_day
            }
            _ => 0.0,
        }
    }
}
