use super::entities::{favorite, recipe, review, Favorite, Recipe, Review};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct RecipeRepository {
    db: DatabaseConnection,
}

impl RecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        recipe_data: &crate::domain::Recipe,
    ) -> Result<recipe::Model, DbErr> {
        let active = recipe::ActiveModel::try_from(recipe_data)?;
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<recipe::Model>, DbErr> {
        Recipe::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn find_all(&self) -> Result<Vec<recipe::Model>, DbErr> {
        Recipe::find()
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_by_creator(&self, user_id: &str) -> Result<Vec<recipe::Model>, DbErr> {
        Recipe::find()
            .filter(recipe::Column::CreatedBy.eq(user_id))
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Writes every field of `recipe_data` over the stored row.
    pub async fn update(
        &self,
        recipe_data: &crate::domain::Recipe,
    ) -> Result<recipe::Model, DbErr> {
        let mut active = recipe::ActiveModel::try_from(recipe_data)?;
        active.id = Unchanged(recipe_data.id);
        active.created_by = Unchanged(recipe_data.created_by.clone());
        active.created_at = Unchanged(recipe_data.created_at);
        active.update(&self.db).await
    }

    /// Deletes the recipe together with its reviews and favorite entries.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        Review::delete_many()
            .filter(review::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Favorite::delete_many()
            .filter(favorite::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Recipe::delete_by_id(id).exec(&txn).await?;

        txn.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::recipe;
    use crate::domain::Difficulty;
    use crate::infrastructure::db::test_connection;

    #[tokio::test]
    async fn test_cooking_time_outside_column_is_refused() {
        let repo = RecipeRepository::new(test_connection().await);
        let oversized = recipe("Slow Roast", 3_000_000_000, Difficulty::Hard);

        assert!(matches!(repo.create(&oversized).await, Err(DbErr::Custom(_))));
        assert!(repo.find_all().await.unwrap().is_empty());

        let stored = recipe("Tea", 5, Difficulty::Easy);
        repo.create(&stored).await.unwrap();
        let mut changed = stored.clone();
        changed.cooking_time = u32::MAX;
        assert!(repo.update(&changed).await.is_err());
        assert_eq!(repo.find_by_id(stored.id).await.unwrap().unwrap().cooking_time, 5);
    }
}
