//! Domain models exchanged with external collaborators.
//!
//! Everything here is a plain serializable value: callers get clones,
//! never references into engine state.

pub mod book;
pub mod reservation;
pub mod review;
pub mod search;
pub mod stats;
pub mod transaction;

pub use book::{Book, BookStatus, BookUpdate, NewBook, SearchQuery};
pub use reservation::{Reservation, ReservationStatus};
pub use review::{NewReview, Review};
pub use search::SearchHistory;
pub use stats::LibraryStatistics;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
