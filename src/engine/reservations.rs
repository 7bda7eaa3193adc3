//! Reservation workflow: queued claims on fully borrowed books.
//!
//! Priorities are per-book monotone slot numbers. Cancelled reservations
//! keep their slot occupied (the counter never rewinds), so queue
//! positions of earlier reservers are stable across cancellations.

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    error::{EngineError, EngineResult},
    models::{BookStatus, Reservation, ReservationStatus, Transaction, TransactionKind},
};

use super::LibraryEngine;

impl LibraryEngine {
    /// Reserve a book that currently has no available copies. Reserving
    /// an available book is rejected as unnecessary. Returns the
    /// reservation and its 1-based position in the book's queue.
    pub fn reserve_book(
        &mut self,
        user_id: &str,
        book_id: &str,
    ) -> EngineResult<(Reservation, usize)> {
        let expiry_days = self.config.reservations.expiry_days;
        let book = self
            .books
            .get_mut(&book_id.to_string())
            .ok_or_else(|| EngineError::NotFound(format!("book {book_id}")))?;

        if book.available_copies > 0 {
            warn!(book_id, user_id, "reservation rejected: copies available");
            return Err(EngineError::InvalidState(format!(
                "book {book_id} has available copies; borrow it instead"
            )));
        }
        // advisory tag: does not block future borrows once copies free up
        book.status = BookStatus::Reserved;

        let priority = self.scheduler.next_priority(book_id);
        let reservation = Reservation::new(user_id, book_id, priority, expiry_days);
        self.scheduler
            .enqueue(book_id, priority, reservation.id.clone());
        self.reservations.append(reservation.clone());
        self.log_reservation_entry(user_id, book_id, TransactionKind::Reservation);

        let position = self.scheduler.queued_for(book_id);
        info!(book_id, user_id, priority, position, "reservation queued");
        Ok((reservation, position))
    }

    /// Mark a reservation cancelled. The roster entry stays; the
    /// scheduler skips it when the queue is drained.
    pub fn cancel_reservation(&mut self, reservation_id: &str) -> EngineResult<()> {
        let entry = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| EngineError::NotFound(format!("reservation {reservation_id}")))?;

        if entry.status == ReservationStatus::Cancelled {
            return Err(EngineError::InvalidState(format!(
                "reservation {reservation_id} is already cancelled"
            )));
        }
        entry.status = ReservationStatus::Cancelled;
        let (user_id, book_id) = (entry.user_id.clone(), entry.book_id.clone());
        self.log_reservation_entry(&user_id, &book_id, TransactionKind::CancelReservation);
        info!(reservation_id, "reservation cancelled");
        Ok(())
    }

    /// Pop the next active, unexpired reservation for a book in
    /// first-reserved-first-served order. Cancelled and expired entries
    /// encountered on the way are consumed and skipped.
    pub fn next_reservation_for(&mut self, book_id: &str) -> Option<Reservation> {
        let now = Utc::now();
        while let Some((_, reservation_id)) = self.scheduler.next_for(book_id) {
            let found = self
                .reservations
                .iter()
                .find(|r| r.id == reservation_id)
                .cloned();
            match found {
                Some(r) if r.status == ReservationStatus::Active && !r.is_expired(now) => {
                    return Some(r)
                }
                _ => continue,
            }
        }
        None
    }

    /// A user's active reservations, oldest first.
    pub fn user_reservations(&self, user_id: &str) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.user_id == user_id && r.status == ReservationStatus::Active)
            .cloned()
            .collect()
    }

    /// Full roster, oldest first (cancelled entries included).
    pub fn all_reservations(&self) -> Vec<Reservation> {
        self.reservations.to_vec()
    }

    /// Number of reservations still queued for a book.
    pub fn reservation_queue_len(&self, book_id: &str) -> usize {
        self.scheduler.queued_for(book_id)
    }

    fn log_reservation_entry(&mut self, user_id: &str, book_id: &str, kind: TransactionKind) {
        self.transactions
            .append(Transaction::event(user_id, book_id, kind));
    }
}
