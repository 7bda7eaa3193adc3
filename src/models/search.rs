//! Search history model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged catalog search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistory {
    pub id: String,
    pub user_id: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub results_count: usize,
}

impl SearchHistory {
    pub fn new(user_id: &str, query: String, results_count: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            query,
            created_at: Utc::now(),
            results_count,
        }
    }
}
