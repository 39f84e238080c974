use super::store_error;
use crate::domain::{AuthContext, ImageUpload, NewRecipe, Recipe, RecipePatch};
use crate::infrastructure::db::RecipeRepository;
use crate::infrastructure::image_host::ImageHost;
use crate::infrastructure::security::InputSanitizer;
use cookbook_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Create, read, update and delete recipes. Images go to the image host
/// before anything is written, so a failed upload leaves no record behind.
pub struct RecipeCatalog {
    recipes: RecipeRepository,
    image_host: Arc<dyn ImageHost>,
}

impl RecipeCatalog {
    pub fn new(recipes: RecipeRepository, image_host: Arc<dyn ImageHost>) -> Self {
        Self { recipes, image_host }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        draft: NewRecipe,
        image: Option<ImageUpload>,
    ) -> Result<Uuid, AppError> {
        let user = ctx.require_user()?;
        let draft = draft.validated()?;

        let image_url = match image {
            Some(image) => Some(self.upload(image).await?),
            None => None,
        };

        let recipe = draft.into_recipe(&user.uid, image_url);

        let model = self.recipes.create(&recipe).await.map_err(store_error)?;
        tracing::info!("User {} created recipe {}", user.uid, model.id);
        Ok(model.id)
    }

    /// All recipes, newest first. Rows that fail validation are skipped.
    pub async fn list_all(&self) -> Result<Vec<Recipe>, AppError> {
        let models = self.recipes.find_all().await.map_err(store_error)?;
        Ok(into_recipes(models))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Recipe>, AppError> {
        match self.recipes.find_by_id(id).await.map_err(store_error)? {
            Some(model) => Ok(Some(Recipe::try_from(model)?)),
            None => Ok(None),
        }
    }

    pub async fn list_by_creator(&self, user_id: &str) -> Result<Vec<Recipe>, AppError> {
        let models = self
            .recipes
            .find_by_creator(user_id)
            .await
            .map_err(store_error)?;
        Ok(into_recipes(models))
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        patch: RecipePatch,
        new_image: Option<ImageUpload>,
    ) -> Result<Recipe, AppError> {
        let mut recipe = self.owned_recipe(ctx, id).await?;

        let mut patch = patch;
        if let Some(url) = patch.image_url.take() {
            patch.image_url = Some(InputSanitizer::validate_image_url(&url)?);
        }
        patch.apply_to(&mut recipe)?;

        if let Some(image) = new_image {
            recipe.image_url = Some(self.upload(image).await?);
        }

        self.recipes.update(&recipe).await.map_err(store_error)?;
        tracing::info!("Recipe {} updated", id);
        Ok(recipe)
    }

    pub async fn delete(&self, ctx: &AuthContext, id: Uuid) -> Result<(), AppError> {
        self.owned_recipe(ctx, id).await?;
        self.recipes.delete(id).await.map_err(store_error)?;
        tracing::info!("Recipe {} deleted", id);
        Ok(())
    }

    /// Loads a recipe the caller is allowed to change.
    async fn owned_recipe(&self, ctx: &AuthContext, id: Uuid) -> Result<Recipe, AppError> {
        let user = ctx.require_user()?;
        let recipe = self.get(id).await?.ok_or(AppError::NotFound)?;
        if !recipe.is_owned_by(&user.uid) {
            tracing::warn!(
                "User {} tried to change recipe {} owned by {}",
                user.uid,
                id,
                recipe.created_by
            );
            return Err(AppError::Forbidden);
        }
        Ok(recipe)
    }

    async fn upload(&self, image: ImageUpload) -> Result<String, AppError> {
        self.image_host.upload(image).await.map_err(|e| match e {
            AppError::ImageUploadFailed(_) => e,
            other => AppError::ImageUploadFailed(other.to_string()),
        })
    }
}

fn into_recipes(models: Vec<crate::infrastructure::db::entities::recipe::Model>) -> Vec<Recipe> {
    models
        .into_iter()
        .filter_map(|model| match Recipe::try_from(model) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                tracing::warn!("Skipping stored recipe: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::new_recipe;
    use crate::domain::{AuthUser, Difficulty};
    use crate::infrastructure::db::test_connection;
    use crate::infrastructure::image_host::FakeImageHost;

    fn signed_in(uid: &str) -> AuthContext {
        AuthContext::signed_in(AuthUser {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            display_name: None,
        })
    }

    async fn catalog_with(host: Arc<FakeImageHost>) -> RecipeCatalog {
        let db = test_connection().await;
        RecipeCatalog::new(RecipeRepository::new(db), host)
    }

    #[tokio::test]
    async fn test_create_requires_sign_in() {
        let catalog = catalog_with(Arc::new(FakeImageHost::new())).await;
        let err = catalog
            .create(&AuthContext::anonymous(), new_recipe("Pasta Bake"), None)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let host = Arc::new(FakeImageHost::new());
        let catalog = catalog_with(host.clone()).await;
        let ctx = signed_in("ana");

        let id = catalog
            .create(&ctx, new_recipe("Pasta Bake"), Some(ImageUpload::jpeg(vec![1, 2, 3])))
            .await
            .unwrap();

        let recipe = catalog.get(id).await.unwrap().unwrap();
        assert_eq!(recipe.title, "Pasta Bake");
        assert_eq!(recipe.created_by, "ana");
        assert_eq!(recipe.ingredients, vec!["pasta", "cheese"]);
        assert!(recipe.image_url.unwrap().starts_with("https://images.test/1/"));
        assert_eq!(host.upload_count(), 1);

        assert_eq!(catalog.list_by_creator("ana").await.unwrap().len(), 1);
        assert!(catalog.list_by_creator("ben").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_cooking_time_is_not_stored() {
        let catalog = catalog_with(Arc::new(FakeImageHost::new())).await;
        let mut draft = new_recipe("Slow Roast");
        draft.cooking_time = 3_000_000_000;

        let err = catalog.create(&signed_in("ana"), draft, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(catalog.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_persists_nothing() {
        let catalog = catalog_with(Arc::new(FakeImageHost::failing())).await;
        let err = catalog
            .create(&signed_in("ana"), new_recipe("Pasta Bake"), Some(ImageUpload::jpeg(vec![1])))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ImageUploadFailed(_)));
        assert!(catalog.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_image_and_checks_owner() {
        let host = Arc::new(FakeImageHost::new());
        let catalog = catalog_with(host.clone()).await;
        let ana = signed_in("ana");
        let id = catalog
            .create(&ana, new_recipe("Tea"), Some(ImageUpload::jpeg(vec![1])))
            .await
            .unwrap();
        let original = catalog.get(id).await.unwrap().unwrap();

        let patch = RecipePatch {
            title: Some("Masala Tea".into()),
            difficulty: Some(Difficulty::Medium),
            ..Default::default()
        };
        let err = catalog
            .update(&signed_in("ben"), id, patch.clone(), None)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Forbidden);

        let updated = catalog.update(&ana, id, patch, None).await.unwrap();
        assert_eq!(updated.title, "Masala Tea");
        assert_eq!(updated.image_url, original.image_url);

        let stored = catalog.get(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Masala Tea");
        assert_eq!(stored.difficulty, Difficulty::Medium);
        assert_eq!(stored.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_update_unsaved() {
        let host = Arc::new(FakeImageHost::new());
        let catalog = catalog_with(host.clone()).await;
        let ana = signed_in("ana");
        let id = catalog.create(&ana, new_recipe("Tea"), None).await.unwrap();

        host.set_failing(true);
        let patch = RecipePatch {
            title: Some("Iced Tea".into()),
            ..Default::default()
        };
        let err = catalog
            .update(&ana, id, patch, Some(ImageUpload::jpeg(vec![9])))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageUploadFailed(_)));
        assert_eq!(catalog.get(id).await.unwrap().unwrap().title, "Tea");
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = catalog_with(Arc::new(FakeImageHost::new())).await;
        let ana = signed_in("ana");
        let id = catalog.create(&ana, new_recipe("Tea"), None).await.unwrap();

        assert_eq!(
            catalog.delete(&signed_in("ben"), id).await.unwrap_err(),
            AppError::Forbidden
        );
        catalog.delete(&ana, id).await.unwrap();
        assert!(catalog.get(id).await.unwrap().is_none());
        assert_eq!(catalog.delete(&ana, id).await.unwrap_err(), AppError::NotFound);
    }
}
