use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: uuid::Uuid,
    pub recipe_id: uuid::Uuid,
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Rating and comment as submitted, already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub rating: i32,
    pub comment: String,
}

impl ReviewInput {
    pub fn new(rating: i32, comment: &str) -> Result<Self, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::validation("Please write a comment"));
        }

        Ok(Self {
            rating,
            comment: comment.to_string(),
        })
    }
}

/// Aggregate over a recipe's reviews. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub total: i64,
    pub count: u64,
}

impl RatingSummary {
    pub fn from_ratings(ratings: impl IntoIterator<Item = i32>) -> Self {
        let (total, count) = ratings
            .into_iter()
            .fold((0i64, 0u64), |(total, count), r| (total + i64::from(r), count + 1));

        if count == 0 {
            return Self::default();
        }

        let mean = total as f64 / count as f64;
        Self {
            average: (mean * 10.0).round() / 10.0,
            total,
            count,
        }
    }

    /// One decimal place, e.g. `4.0`.
    pub fn display_average(&self) -> String {
        format!("{:.1}", self.average)
    }
}
