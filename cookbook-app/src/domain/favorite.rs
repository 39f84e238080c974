use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub user_id: String,
    pub recipe_id: uuid::Uuid,
    pub added_at: chrono::DateTime<chrono::Utc>,
}

/// Result of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub recipe_id: uuid::Uuid,
    pub favorite: bool,
}
