//! External-store collaborator: JSON files, one per collection.
//!
//! The engine itself never touches the filesystem; this module drains
//! its bulk enumerate/ingest boundary. Save and load are blocking,
//! all-or-nothing per collection, and a failing collection is reported
//! without aborting the others.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info};

use crate::engine::LibraryEngine;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Outcome of saving or loading one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResult {
    pub collection: &'static str,
    pub success: bool,
    pub count: usize,
    pub message: String,
}

impl CollectionResult {
    fn ok(collection: &'static str, count: usize) -> Self {
        Self {
            collection,
            success: true,
            count,
            message: format!("{count} records"),
        }
    }

    fn failed(collection: &'static str, error: &StoreError) -> Self {
        error!(collection, %error, "collection persistence failed");
        Self {
            collection,
            success: false,
            count: 0,
            message: error.to_string(),
        }
    }
}

/// File-per-collection JSON store.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn write<T: Serialize>(&self, file: &str, records: &[T]) -> Result<usize, StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(records)?;
        fs::write(self.path(file), json)?;
        Ok(records.len())
    }

    /// Missing files read as empty collections; a fresh data directory
    /// is not an error.
    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.path(file);
        if !Path::new(&path).exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Enumerate every collection out of the engine into its file.
    pub fn save(&self, engine: &LibraryEngine) -> Vec<CollectionResult> {
        let results = vec![
            self.save_one("books", "books.json", &engine.export_books()),
            self.save_one(
                "transactions",
                "transactions.json",
                &engine.export_transactions(),
            ),
            self.save_one(
                "reservations",
                "reservations.json",
                &engine.export_reservations(),
            ),
            self.save_one("reviews", "reviews.json", &engine.export_reviews()),
            self.save_one(
                "search_history",
                "search_history.json",
                &engine.export_search_history(),
            ),
        ];
        info!(dir = %self.data_dir.display(), "library state saved");
        results
    }

    fn save_one<T: Serialize>(
        &self,
        collection: &'static str,
        file: &str,
        records: &[T],
    ) -> CollectionResult {
        match self.write(file, records) {
            Ok(count) => CollectionResult::ok(collection, count),
            Err(e) => CollectionResult::failed(collection, &e),
        }
    }

    /// Repopulate an engine from the data directory, collection by
    /// collection.
    pub fn load(&self, engine: &mut LibraryEngine) -> Vec<CollectionResult> {
        let mut results = Vec::with_capacity(5);

        results.push(match self.read("books.json") {
            Ok(records) => {
                let report = engine.ingest_books(records);
                CollectionResult::ok("books", report.imported)
            }
            Err(e) => CollectionResult::failed("books", &e),
        });

        results.push(match self.read("transactions.json") {
            Ok(records) => {
                let report = engine.ingest_transactions(records);
                CollectionResult::ok("transactions", report.imported)
            }
            Err(e) => CollectionResult::failed("transactions", &e),
        });

        results.push(match self.read("reservations.json") {
            Ok(records) => {
                let report = engine.ingest_reservations(records);
                CollectionResult::ok("reservations", report.imported)
            }
            Err(e) => CollectionResult::failed("reservations", &e),
        });

        results.push(match self.read("reviews.json") {
            Ok(records) => {
                let report = engine.ingest_reviews(records);
                CollectionResult::ok("reviews", report.imported)
            }
            Err(e) => CollectionResult::failed("reviews", &e),
        });

        results.push(match self.read("search_history.json") {
            Ok(records) => {
                let report = engine.ingest_search_history(records);
                CollectionResult::ok("search_history", report.imported)
            }
            Err(e) => CollectionResult::failed("search_history", &e),
        });

        results
    }
}
