//! Review / rating model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    /// Integer rating, 1 to 5 inclusive.
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub helpful_count: u32,
}

/// Review submission payload; rating bounds are enforced before the
/// review reaches the ledger.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}

impl Review {
    pub fn new(user_id: &str, book_id: &str, rating: u8, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            user_id: user_id.to_string(),
            rating,
            text,
            created_at: Utc::now(),
            helpful_count: 0,
        }
    }
}
