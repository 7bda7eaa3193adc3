//! Review aggregation: submissions and rolling average recomputation.

use tracing::info;
use validator::Validate;

use crate::{
    error::{EngineError, EngineResult},
    models::{NewReview, Review},
};

use super::LibraryEngine;

impl LibraryEngine {
    /// Submit a rating and review text for a book. The book's rolling
    /// average is recomputed as the arithmetic mean over every review
    /// recorded for it.
    pub fn add_review(
        &mut self,
        user_id: &str,
        book_id: &str,
        review: NewReview,
    ) -> EngineResult<Review> {
        // rating bounds first, then existence
        review.validate()?;
        if !self.books.contains(&book_id.to_string()) {
            return Err(EngineError::NotFound(format!("book {book_id}")));
        }

        let entry = Review::new(user_id, book_id, review.rating, review.text);
        self.reviews.append(entry.clone());
        self.recompute_rating(book_id);

        info!(book_id, user_id, rating = review.rating, "review added");
        Ok(entry)
    }

    /// All reviews for a book, oldest first.
    pub fn book_reviews(&self, book_id: &str) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub(crate) fn recompute_rating(&mut self, book_id: &str) {
        let (sum, count) = self
            .reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .fold((0u64, 0u64), |(sum, count), r| {
                (sum + u64::from(r.rating), count + 1)
            });
        if let Some(book) = self.books.get_mut(&book_id.to_string()) {
            book.rating = if count > 0 {
                sum as f64 / count as f64
            } else {
                0.0
            };
        }
    }
}
