//! Aggregated library statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryStatistics {
    pub total_books: usize,
    pub available_books: usize,
    pub borrowed_books: usize,
    pub total_transactions: usize,
    pub total_fines: f64,
    /// Mean rating across every review in the system.
    pub average_rating: f64,
    /// Title of the book with the highest cumulative borrow count.
    /// Ties resolve to the smallest book id.
    pub most_borrowed_book: String,
    /// Category with the highest summed borrow count. Ties resolve to
    /// the earliest-registered category.
    pub most_borrowed_category: String,
    pub generated_at: DateTime<Utc>,
}
