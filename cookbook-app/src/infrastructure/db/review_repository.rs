use super::entities::{review, Review};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct ReviewRepository {
    db: DatabaseConnection,
}

impl ReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<review::Model>, DbErr> {
        Review::find_by_id(id).one(&self.db).await
    }

    /// Newest first.
    pub async fn find_by_recipe(&self, recipe_id: Uuid) -> Result<Vec<review::Model>, DbErr> {
        Review::find()
            .filter(review::Column::RecipeId.eq(recipe_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_by_recipe_and_user(
        &self,
        recipe_id: Uuid,
        user_id: &str,
    ) -> Result<Option<review::Model>, DbErr> {
        Review::find()
            .filter(review::Column::RecipeId.eq(recipe_id))
            .filter(review::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn ratings(&self, recipe_id: Uuid) -> Result<Vec<i32>, DbErr> {
        Review::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::RecipeId.eq(recipe_id))
            .into_tuple()
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        recipe_id: Uuid,
        user_id: &str,
        user_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<review::Model, DbErr> {
        let active = review::ActiveModel {
            id: Set(Uuid::new_v4()),
            recipe_id: Set(recipe_id),
            user_id: Set(user_id.to_string()),
            user_name: Set(user_name.to_string()),
            rating: Set(rating),
            comment: Set(comment.to_string()),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(&self.db).await
    }

    /// Replaces rating and comment, keeping id, author and timestamp.
    pub async fn update(
        &self,
        existing: review::Model,
        user_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<review::Model, DbErr> {
        let mut active: review::ActiveModel = existing.into();
        active.user_name = Set(user_name.to_string());
        active.rating = Set(rating);
        active.comment = Set(comment.to_string());
        active.update(&self.db).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        Review::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
