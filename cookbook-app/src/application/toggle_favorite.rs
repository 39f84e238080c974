use super::store_error;
use crate::domain::{AuthContext, FavoriteEntry, FavoriteStatus};
use crate::infrastructure::db::{FavoriteRepository, RecipeRepository};
use cookbook_errors::AppError;
use std::collections::HashSet;
use uuid::Uuid;

pub struct FavoritesLedger {
    favorites: FavoriteRepository,
    recipes: RecipeRepository,
}

impl FavoritesLedger {
    pub fn new(favorites: FavoriteRepository, recipes: RecipeRepository) -> Self {
        Self { favorites, recipes }
    }

    /// Anonymous callers have no favorites.
    pub async fn is_favorite(&self, ctx: &AuthContext, recipe_id: Uuid) -> Result<bool, AppError> {
        let Some(user) = ctx.user() else {
            return Ok(false);
        };
        self.favorites
            .exists(&user.uid, recipe_id)
            .await
            .map_err(store_error)
    }

    /// Flips the favorite based on the state the caller last saw and
    /// returns the state after the write.
    pub async fn toggle(
        &self,
        ctx: &AuthContext,
        recipe_id: Uuid,
        currently_favorite: bool,
    ) -> Result<FavoriteStatus, AppError> {
        let user = ctx.require_user()?;

        if currently_favorite {
            self.favorites
                .remove(&user.uid, recipe_id)
                .await
                .map_err(store_error)?;
            tracing::info!("User {} unfavorited recipe {}", user.uid, recipe_id);
        } else {
            if !self.recipes.exists(recipe_id).await.map_err(store_error)? {
                return Err(AppError::NotFound);
            }
            self.favorites
                .add(&user.uid, recipe_id)
                .await
                .map_err(store_error)?;
            tracing::info!("User {} favorited recipe {}", user.uid, recipe_id);
        }

        Ok(FavoriteStatus {
            recipe_id,
            favorite: !currently_favorite,
        })
    }

    pub async fn favorite_ids(&self, ctx: &AuthContext) -> Result<HashSet<Uuid>, AppError> {
        match ctx.user() {
            Some(user) => self
                .favorites
                .recipe_ids(&user.uid)
                .await
                .map_err(store_error),
            None => Ok(HashSet::new()),
        }
    }

    /// The caller's favorite entries, most recently added first.
    pub async fn favorites(&self, ctx: &AuthContext) -> Result<Vec<FavoriteEntry>, AppError> {
        let user = ctx.require_user()?;
        let models = self
            .favorites
            .find_by_user(&user.uid)
            .await
            .map_err(store_error)?;
        Ok(models.into_iter().map(FavoriteEntry::from).collect())
    }
}
