//! Hand-built indexed data structures backing the catalog engine.
//!
//! The binary search tree is the single owner of every catalog record;
//! all other indices hold only the record id, so an update in one place
//! can never desynchronize a copy held somewhere else.

pub mod bst;
pub mod graph;
pub mod hash;
pub mod heap;
pub mod linked_list;

pub use bst::BstIndex;
pub use graph::RecommendationGraph;
pub use hash::ChainedHashIndex;
pub use heap::{MinHeap, PriorityScheduler};
pub use linked_list::LinkedList;
