//! Lending workflow: borrow, return, overdue tracking.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::{
    error::{EngineError, EngineResult},
    models::{BookStatus, Transaction, TransactionKind, TransactionStatus},
};

use super::LibraryEngine;

impl LibraryEngine {
    /// Borrow a copy of a book. Decrements the copy pool, bumps the
    /// borrow counter, opens a `Borrow` ledger entry with a due date of
    /// now + `duration_days` (engine default when `None`) and returns
    /// the entry id.
    pub fn borrow_book(
        &mut self,
        user_id: &str,
        book_id: &str,
        duration_days: Option<i64>,
    ) -> EngineResult<String> {
        let duration = duration_days.unwrap_or(self.config.lending.loan_duration_days);
        let book = self
            .books
            .get_mut(&book_id.to_string())
            .ok_or_else(|| EngineError::NotFound(format!("book {book_id}")))?;

        if book.available_copies == 0 {
            warn!(book_id, user_id, "borrow rejected: no copies available");
            return Err(EngineError::Unavailable(format!(
                "no copies of {book_id} available"
            )));
        }

        book.available_copies -= 1;
        book.borrow_count += 1;
        if book.available_copies == 0 {
            book.status = BookStatus::Borrowed;
        }

        let due_date = Utc::now() + Duration::days(duration);
        let transaction = Transaction::borrow(user_id, book_id, due_date);
        let transaction_id = transaction.id.clone();
        self.transactions.append(transaction);

        info!(book_id, user_id, %transaction_id, "book borrowed");
        Ok(transaction_id)
    }

    /// Close a borrow entry: set the return timestamp, compute the late
    /// fine, restore the copy pool and return the fine owed.
    pub fn return_book(&mut self, transaction_id: &str) -> EngineResult<f64> {
        let fine_per_day = self.config.lending.fine_per_day;

        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| EngineError::NotFound(format!("transaction {transaction_id}")))?;

        if transaction.kind != TransactionKind::Borrow {
            return Err(EngineError::InvalidState(format!(
                "transaction {transaction_id} is not a borrow entry"
            )));
        }
        if transaction.status != TransactionStatus::Active {
            return Err(EngineError::InvalidState(format!(
                "transaction {transaction_id} is already closed"
            )));
        }

        transaction.returned_at = Some(Utc::now());
        transaction.status = TransactionStatus::Completed;
        let fine = transaction.calculate_fine(fine_per_day);
        transaction.fine_amount = fine;
        let book_id = transaction.book_id.clone();

        // The ledger closes even if the book was deleted in the meantime;
        // only the copy pool update is skipped then.
        if let Some(book) = self.books.get_mut(&book_id) {
            if book.available_copies < book.total_copies {
                book.available_copies += 1;
            }
            // Borrowed and the advisory Reserved tag both clear once a
            // copy is back on the shelf; Maintenance is sticky.
            if book.available_copies > 0 && book.status != BookStatus::Maintenance {
                book.status = BookStatus::Available;
            }
        } else {
            warn!(%book_id, "returned transaction references a deleted book");
        }

        info!(%book_id, transaction_id, fine, "book returned");
        Ok(fine)
    }

    /// Snapshot of a ledger entry by id.
    pub fn get_transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
    }

    /// Full ledger, oldest first.
    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.transactions.to_vec()
    }

    /// A user's ledger entries, oldest first.
    pub fn user_transactions(&self, user_id: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Borrow entries still open.
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Borrow && t.status == TransactionStatus::Active)
            .cloned()
            .collect()
    }

    /// Open borrow entries past their due date.
    pub fn overdue_transactions(&self) -> Vec<Transaction> {
        let now = Utc::now();
        self.pending_transactions()
            .into_iter()
            .filter(|t| t.is_overdue(now))
            .collect()
    }
}
