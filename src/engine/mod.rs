//! Library engine: orchestration over the catalog index structures.
//!
//! The engine owns every structure and every record. Operations run to
//! completion synchronously; composition is strictly one-directional
//! (engine → structures). Callers needing shared access wrap the engine
//! in their own mutex.

mod catalog;
mod lending;
mod recommend;
mod reservations;
mod reviews;
mod snapshot;
mod stats;

pub use snapshot::{IngestReport, LibrarySnapshot};

use indexmap::IndexMap;

use crate::{
    config::EngineConfig,
    index::{BstIndex, ChainedHashIndex, LinkedList, PriorityScheduler, RecommendationGraph},
    models::{Book, Reservation, Review, SearchHistory, Transaction},
};

/// Core manager for catalog, lending, reservation, review and
/// recommendation workflows.
///
/// The id-keyed search tree is the single source of truth for book
/// records; the title/author hash indices, the per-category shelf lists
/// and the recommendation graph all store book ids only.
pub struct LibraryEngine {
    config: EngineConfig,

    /// Books by id (canonical store, ordered enumeration).
    books: BstIndex<String, Book>,
    /// Normalized title -> book id. Last write wins on duplicate titles.
    title_index: ChainedHashIndex<String>,
    /// Normalized author -> book id. Last write wins.
    author_index: ChainedHashIndex<String>,
    /// Category -> shelf list of book ids, in registration order.
    shelves: IndexMap<String, LinkedList<String>>,

    /// Append-only transaction ledger; entries are closed in place.
    transactions: LinkedList<Transaction>,
    /// Reservation roster (marked, never deleted).
    reservations: LinkedList<Reservation>,
    /// Per-book priority queues over the roster.
    scheduler: PriorityScheduler,

    reviews: LinkedList<Review>,
    search_log: LinkedList<SearchHistory>,

    graph: RecommendationGraph,
}

impl LibraryEngine {
    pub fn new(config: EngineConfig) -> Self {
        let capacity = config.index.hash_capacity;
        Self {
            config,
            books: BstIndex::new(),
            title_index: ChainedHashIndex::with_capacity(capacity),
            author_index: ChainedHashIndex::with_capacity(capacity),
            shelves: IndexMap::new(),
            transactions: LinkedList::new(),
            reservations: LinkedList::new(),
            scheduler: PriorityScheduler::new(),
            reviews: LinkedList::new(),
            search_log: LinkedList::new(),
            graph: RecommendationGraph::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Secondary keys are case-folded and trimmed before hitting the
    /// hash indices; the structures themselves store keys verbatim.
    pub(crate) fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase()
    }
}

impl Default for LibraryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
