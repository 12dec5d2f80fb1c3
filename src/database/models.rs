use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query_builder::SearchFieldSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub fields: SearchFieldSet,
    /// Query generated when the snapshot was saved.
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
