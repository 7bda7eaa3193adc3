//! Reservation model: a queued claim on a fully borrowed book.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

/// Reservations are only ever marked, never deleted, and their priority
/// slot stays occupied after cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub created_at: DateTime<Utc>,
    /// Per-book monotone slot number; smaller is served first.
    pub priority: u64,
    pub status: ReservationStatus,
    pub expires_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(user_id: &str, book_id: &str, priority: u64, expiry_days: i64) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            created_at,
            priority,
            status: ReservationStatus::Active,
            expires_at: created_at + Duration::days(expiry_days),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
