use super::entities::{favorite, Favorite};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Clone)]
pub struct FavoriteRepository {
    db: DatabaseConnection,
}

impl FavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, user_id: &str, recipe_id: Uuid) -> Result<bool, DbErr> {
        let favorite = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::RecipeId.eq(recipe_id))
            .one(&self.db)
            .await?;
        Ok(favorite.is_some())
    }

    /// Adds the entry, or refreshes `added_at` when it is already there.
    pub async fn add(&self, user_id: &str, recipe_id: Uuid) -> Result<(), DbErr> {
        let active = favorite::ActiveModel {
            user_id: Set(user_id.to_string()),
            recipe_id: Set(recipe_id),
            added_at: Set(chrono::Utc::now()),
        };

        Favorite::insert(active)
            .on_conflict(
                OnConflict::columns([favorite::Column::UserId, favorite::Column::RecipeId])
                    .update_column(favorite::Column::AddedAt)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    /// Removing an entry that is not there is not an error.
    pub async fn remove(&self, user_id: &str, recipe_id: Uuid) -> Result<(), DbErr> {
        Favorite::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<favorite::Model>, DbErr> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::AddedAt)
            .all(&self.db)
            .await
    }

    pub async fn recipe_ids(&self, user_id: &str) -> Result<HashSet<Uuid>, DbErr> {
        let ids: Vec<Uuid> = Favorite::find()
            .select_only()
            .column(favorite::Column::RecipeId)
            .filter(favorite::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }
}
