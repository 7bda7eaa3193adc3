//! Recommendation surface over the similarity graph.

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::LibraryEngine;

impl LibraryEngine {
    /// Declare a directed similarity edge between two catalog books.
    /// Weights live in (0, 1]; callers wanting symmetry issue both
    /// directions. Duplicate edges keep their first weight.
    pub fn relate_books(&mut self, from: &str, to: &str, weight: f64) -> EngineResult<()> {
        if !self.books.contains(&from.to_string()) {
            return Err(EngineError::NotFound(format!("book {from}")));
        }
        if !self.books.contains(&to.to_string()) {
            return Err(EngineError::NotFound(format!("book {to}")));
        }
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(EngineError::Validation(format!(
                "similarity weight {weight} outside (0, 1]"
            )));
        }
        self.graph.add_edge(from, to, weight);
        info!(from, to, weight, "similarity edge added");
        Ok(())
    }

    /// Ranked suggestions for a book: (title, combined weight) pairs,
    /// strongest first. Graph ids that no longer resolve in the catalog
    /// are dropped. `depth` falls back to the configured default.
    pub fn recommend(&self, book_id: &str, depth: Option<usize>) -> Vec<(String, f64)> {
        let depth = depth.unwrap_or(self.config.recommendation.default_depth);
        self.graph
            .recommend(book_id, depth)
            .into_iter()
            .filter_map(|(id, weight)| {
                self.books.get(&id).map(|book| (book.title.clone(), weight))
            })
            .collect()
    }

    /// Same traversal, keeping raw book ids instead of titles.
    pub fn recommend_ids(&self, book_id: &str, depth: Option<usize>) -> Vec<(String, f64)> {
        let depth = depth.unwrap_or(self.config.recommendation.default_depth);
        self.graph.recommend(book_id, depth)
    }
}
