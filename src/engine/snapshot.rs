//! Bulk enumerate/ingest boundary for the external persistence store.
//!
//! Export hands out full clones of every collection; ingest is additive
//! and order-independent, except that re-ingesting a book id overwrites
//! the existing record. A rejected record never aborts the rest of its
//! collection, and a collection's failures never abort the others.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{Book, Reservation, ReservationStatus, Review, SearchHistory, Transaction};

use super::LibraryEngine;

/// Full engine state as plain collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub search_history: Vec<SearchHistory>,
}

/// Per-collection ingest outcome.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub collection: &'static str,
    pub imported: usize,
    pub rejected: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl IngestReport {
    fn new(collection: &'static str) -> Self {
        Self {
            collection,
            imported: 0,
            rejected: 0,
            warnings: Vec::new(),
        }
    }

    fn reject(&mut self, warning: String) {
        self.rejected += 1;
        self.warnings.push(warning);
    }
}

impl LibraryEngine {
    // -------------------------------------------------------------
    // Export
    // -------------------------------------------------------------

    /// Books in ascending id order.
    pub fn export_books(&self) -> Vec<Book> {
        self.all_books()
    }

    pub fn export_transactions(&self) -> Vec<Transaction> {
        self.all_transactions()
    }

    pub fn export_reservations(&self) -> Vec<Reservation> {
        self.all_reservations()
    }

    pub fn export_reviews(&self) -> Vec<Review> {
        self.reviews.to_vec()
    }

    pub fn export_search_history(&self) -> Vec<SearchHistory> {
        self.search_log.to_vec()
    }

    pub fn export_snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.export_books(),
            transactions: self.export_transactions(),
            reservations: self.export_reservations(),
            reviews: self.export_reviews(),
            search_history: self.export_search_history(),
        }
    }

    // -------------------------------------------------------------
    // Ingest
    // -------------------------------------------------------------

    /// Ingest book records. Invalid copy counts are rejected per record;
    /// an already-present id is overwritten, not duplicated.
    pub fn ingest_books(&mut self, books: Vec<Book>) -> IngestReport {
        let mut report = IngestReport::new("books");
        for book in books {
            if book.id.trim().is_empty() {
                report.reject("book with empty id".to_string());
                continue;
            }
            if book.available_copies > book.total_copies {
                report.reject(format!(
                    "book {}: available copies {} exceed total {}",
                    book.id, book.available_copies, book.total_copies
                ));
                continue;
            }
            self.put_book_record(book);
            report.imported += 1;
        }
        info!(imported = report.imported, rejected = report.rejected, "books ingested");
        report
    }

    /// Ingest ledger entries (appended verbatim; ids are caller data).
    pub fn ingest_transactions(&mut self, transactions: Vec<Transaction>) -> IngestReport {
        let mut report = IngestReport::new("transactions");
        for transaction in transactions {
            if transaction.id.trim().is_empty()
                || transaction.user_id.trim().is_empty()
                || transaction.book_id.trim().is_empty()
            {
                report.reject("transaction with missing id fields".to_string());
                continue;
            }
            self.transactions.append(transaction);
            report.imported += 1;
        }
        info!(imported = report.imported, rejected = report.rejected, "transactions ingested");
        report
    }

    /// Ingest reservations. Active entries are re-queued in their book's
    /// scheduler; every entry re-occupies its priority slot so future
    /// reservations are numbered past it.
    pub fn ingest_reservations(&mut self, reservations: Vec<Reservation>) -> IngestReport {
        let mut report = IngestReport::new("reservations");
        for reservation in reservations {
            if reservation.id.trim().is_empty()
                || reservation.user_id.trim().is_empty()
                || reservation.book_id.trim().is_empty()
            {
                report.reject("reservation with missing id fields".to_string());
                continue;
            }
            self.scheduler
                .restore_slot(&reservation.book_id, reservation.priority);
            if reservation.status == ReservationStatus::Active {
                self.scheduler.enqueue(
                    &reservation.book_id,
                    reservation.priority,
                    reservation.id.clone(),
                );
            }
            self.reservations.append(reservation);
            report.imported += 1;
        }
        info!(imported = report.imported, rejected = report.rejected, "reservations ingested");
        report
    }

    /// Ingest reviews; out-of-range ratings are rejected per record.
    /// Affected books get their rolling average recomputed afterwards.
    pub fn ingest_reviews(&mut self, reviews: Vec<Review>) -> IngestReport {
        let mut report = IngestReport::new("reviews");
        let mut touched: Vec<String> = Vec::new();
        for review in reviews {
            if !(1..=5).contains(&review.rating) {
                report.reject(format!(
                    "review {}: rating {} outside 1-5",
                    review.id, review.rating
                ));
                continue;
            }
            if !touched.contains(&review.book_id) {
                touched.push(review.book_id.clone());
            }
            self.reviews.append(review);
            report.imported += 1;
        }
        for book_id in touched {
            self.recompute_rating(&book_id);
        }
        info!(imported = report.imported, rejected = report.rejected, "reviews ingested");
        report
    }

    pub fn ingest_search_history(&mut self, entries: Vec<SearchHistory>) -> IngestReport {
        let mut report = IngestReport::new("search_history");
        for entry in entries {
            if entry.id.trim().is_empty() || entry.user_id.trim().is_empty() {
                report.reject("search entry with missing id fields".to_string());
                continue;
            }
            self.search_log.append(entry);
            report.imported += 1;
        }
        report
    }

    /// Ingest a full snapshot, one collection at a time. Reports come
    /// back per collection; a bad collection never blocks the rest.
    pub fn ingest_snapshot(&mut self, snapshot: LibrarySnapshot) -> Vec<IngestReport> {
        let reports = vec![
            self.ingest_books(snapshot.books),
            self.ingest_transactions(snapshot.transactions),
            self.ingest_reservations(snapshot.reservations),
            self.ingest_reviews(snapshot.reviews),
            self.ingest_search_history(snapshot.search_history),
        ];
        for report in &reports {
            if report.rejected > 0 {
                warn!(
                    collection = report.collection,
                    rejected = report.rejected,
                    "snapshot ingest rejected records"
                );
            }
        }
        reports
    }
}
