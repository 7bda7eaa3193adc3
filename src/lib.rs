//! Atheneum catalog engine
//!
//! An in-memory library management core built on hand-indexed data
//! structures: an id-keyed search tree, chained hash indices for title
//! and author, linked ledgers, per-book reservation heaps and a weighted
//! similarity graph for recommendations.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod models;
pub mod persistence;

pub use config::EngineConfig;
pub use engine::{IngestReport, LibraryEngine, LibrarySnapshot};
pub use error::{EngineError, EngineResult, ErrorCode, Outcome};
