//! Statistics aggregation over every structure the engine owns.

use chrono::Utc;
use indexmap::IndexMap;

use crate::models::{Book, LibraryStatistics};

use super::LibraryEngine;

impl LibraryEngine {
    /// Aggregate catalog, ledger and review figures.
    ///
    /// Tie-breaks are deterministic: the most-borrowed book resolves to
    /// the smallest id (ascending tree order, strict-greater replacement)
    /// and the busiest category to the earliest registered one (shelf
    /// insertion order).
    pub fn statistics(&self) -> LibraryStatistics {
        let mut total_books = 0usize;
        let mut available_books = 0usize;
        let mut most_borrowed: Option<&Book> = None;
        let mut category_borrows: IndexMap<&str, u64> = IndexMap::new();
        for category in self.shelves.keys() {
            category_borrows.insert(category.as_str(), 0);
        }

        for (_, book) in self.books.enumerate() {
            total_books += 1;
            if book.available_copies > 0 {
                available_books += 1;
            }
            *category_borrows.entry(book.category.as_str()).or_insert(0) +=
                book.borrow_count;
            if most_borrowed.map_or(true, |best| book.borrow_count > best.borrow_count) {
                most_borrowed = Some(book);
            }
        }

        let mut best_category: Option<(&str, u64)> = None;
        for (category, count) in &category_borrows {
            if best_category.map_or(true, |(_, c)| *count > c) {
                best_category = Some((category, *count));
            }
        }
        let most_borrowed_category = best_category
            .map(|(category, _)| category.to_string())
            .unwrap_or_default();

        let total_fines: f64 = self.transactions.iter().map(|t| t.fine_amount).sum();

        let (rating_sum, rating_count) = self
            .reviews
            .iter()
            .fold((0u64, 0u64), |(sum, count), r| {
                (sum + u64::from(r.rating), count + 1)
            });
        let average_rating = if rating_count > 0 {
            rating_sum as f64 / rating_count as f64
        } else {
            0.0
        };

        LibraryStatistics {
            total_books,
            available_books,
            borrowed_books: total_books - available_books,
            total_transactions: self.transactions.len(),
            total_fines,
            average_rating,
            most_borrowed_book: most_borrowed
                .map(|b| b.title.clone())
                .unwrap_or_default(),
            most_borrowed_category,
            generated_at: Utc::now(),
        }
    }

    /// Top books by cumulative borrow count (ties keep ascending id
    /// order, the sort is stable).
    pub fn popular_books(&self, limit: usize) -> Vec<Book> {
        let mut books = self.all_books();
        books.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count));
        books.truncate(limit);
        books
    }

    /// Top books by rolling average rating.
    pub fn highest_rated_books(&self, limit: usize) -> Vec<Book> {
        let mut books = self.all_books();
        books.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        books.truncate(limit);
        books
    }
}
