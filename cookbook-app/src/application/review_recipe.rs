use super::store_error;
use crate::domain::{
    AuthContext, AuthUser, RatingSummary, Review, ReviewInput, MAX_RATING, MIN_RATING,
};
use crate::infrastructure::db::entities::review;
use crate::infrastructure::db::{RecipeRepository, ReviewRepository};
use cookbook_errors::AppError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use uuid::Uuid;

/// Reviews of one recipe together with their summary.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReviews {
    pub reviews: Vec<Review>,
    pub summary: RatingSummary,
}

pub struct ReviewLedger {
    reviews: ReviewRepository,
    recipes: RecipeRepository,
}

impl ReviewLedger {
    pub fn new(reviews: ReviewRepository, recipes: RecipeRepository) -> Self {
        Self { reviews, recipes }
    }

    /// One review per user and recipe. A second submission replaces the
    /// rating and comment of the first.
    pub async fn add_or_update(
        &self,
        ctx: &AuthContext,
        recipe_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> Result<Review, AppError> {
        let user = ctx.require_user()?;
        let input = ReviewInput::new(rating, comment)?;

        if !self.recipes.exists(recipe_id).await.map_err(store_error)? {
            return Err(AppError::NotFound);
        }

        let existing = self
            .reviews
            .find_by_recipe_and_user(recipe_id, &user.uid)
            .await
            .map_err(store_error)?;

        let model = match existing {
            Some(existing) => {
                tracing::info!("User {} updated review of recipe {}", user.uid, recipe_id);
                self.reviews
                    .update(existing, user.display_name(), input.rating, &input.comment)
                    .await
                    .map_err(store_error)?
            }
            None => self.insert_review(recipe_id, user, &input).await?,
        };

        Review::try_from(model)
    }

    /// Inserts a first review. When a concurrent submission by the same user
    /// got there first, the unique index rejects the insert and that row is
    /// updated instead.
    async fn insert_review(
        &self,
        recipe_id: Uuid,
        user: &AuthUser,
        input: &ReviewInput,
    ) -> Result<review::Model, AppError> {
        let inserted = self
            .reviews
            .create(
                recipe_id,
                &user.uid,
                user.display_name(),
                input.rating,
                &input.comment,
            )
            .await;

        match inserted {
            Ok(model) => {
                tracing::info!("User {} reviewed recipe {}", user.uid, recipe_id);
                Ok(model)
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!(
                    "Review of recipe {} by {} already exists, updating it",
                    recipe_id,
                    user.uid
                );
                let existing = self
                    .reviews
                    .find_by_recipe_and_user(recipe_id, &user.uid)
                    .await
                    .map_err(store_error)?
                    .ok_or_else(|| store_error(e))?;
                self.reviews
                    .update(existing, user.display_name(), input.rating, &input.comment)
                    .await
                    .map_err(store_error)
            }
            Err(e) => Err(store_error(e)),
        }
    }

    /// Newest first.
    pub async fn list(&self, recipe_id: Uuid) -> Result<Vec<Review>, AppError> {
        let models = self
            .reviews
            .find_by_recipe(recipe_id)
            .await
            .map_err(store_error)?;

        Ok(models
            .into_iter()
            .filter_map(|model| match Review::try_from(model) {
                Ok(review) => Some(review),
                Err(e) => {
                    tracing::warn!("Skipping stored review: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Stored ratings outside the allowed range are left out, the same rows
    /// `list` skips.
    pub async fn summarize(&self, recipe_id: Uuid) -> Result<RatingSummary, AppError> {
        let ratings = self.reviews.ratings(recipe_id).await.map_err(store_error)?;
        Ok(RatingSummary::from_ratings(ratings.into_iter().filter(|rating| {
            let valid = (MIN_RATING..=MAX_RATING).contains(rating);
            if !valid {
                tracing::warn!("Skipping stored rating {} on recipe {}", rating, recipe_id);
            }
            valid
        })))
    }

    pub async fn user_review(
        &self,
        recipe_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Review>, AppError> {
        self.reviews
            .find_by_recipe_and_user(recipe_id, user_id)
            .await
            .map_err(store_error)?
            .map(Review::try_from)
            .transpose()
    }

    /// Fetches the list and the summary together. Fails if either does.
    pub async fn detail(&self, recipe_id: Uuid) -> Result<RecipeReviews, AppError> {
        let (reviews, summary) =
            tokio::try_join!(self.list(recipe_id), self.summarize(recipe_id))?;
        Ok(RecipeReviews { reviews, summary })
    }

    pub async fn remove(
        &self,
        ctx: &AuthContext,
        recipe_id: Uuid,
        review_id: Uuid,
    ) -> Result<(), AppError> {
        let user = ctx.require_user()?;

        let review = self
            .reviews
            .find_by_id(review_id)
            .await
            .map_err(store_error)?
            .filter(|review| review.recipe_id == recipe_id)
            .ok_or(AppError::NotFound)?;

        if review.user_id != user.uid {
            tracing::warn!(
                "User {} tried to remove review {} by {}",
                user.uid,
                review_id,
                review.user_id
            );
            return Err(AppError::Forbidden);
        }

        self.reviews.delete(review_id).await.map_err(store_error)?;
        tracing::info!("Review {} removed", review_id);
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
