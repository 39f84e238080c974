use crate::application::{Accounts, FavoritesLedger, RecipeCatalog, ReviewLedger};
use crate::config::AppConfig;
use crate::infrastructure::db::{
    self, FavoriteRepository, RecipeRepository, ReviewRepository, UserRepository,
};
use crate::infrastructure::identity::{FirebaseAuthClient, IdentityProvider};
use crate::infrastructure::image_host::{CloudinaryClient, ImageHost};
use crate::infrastructure::security::RateLimiter;
use cookbook_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<Accounts>,
    pub recipes: Arc<RecipeCatalog>,
    pub favorites: Arc<FavoritesLedger>,
    pub reviews: Arc<ReviewLedger>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        image_host: Arc<dyn ImageHost>,
    ) -> Self {
        tracing::info!(
            "Using {} for accounts and {} for images",
            identity.provider_name(),
            image_host.host_name()
        );

        let recipe_repo = RecipeRepository::new(db.clone());
        Self {
            accounts: Arc::new(Accounts::new(identity, UserRepository::new(db.clone()))),
            recipes: Arc::new(RecipeCatalog::new(recipe_repo.clone(), image_host)),
            favorites: Arc::new(FavoritesLedger::new(
                FavoriteRepository::new(db.clone()),
                recipe_repo.clone(),
            )),
            reviews: Arc::new(ReviewLedger::new(ReviewRepository::new(db), recipe_repo)),
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Connects to the database, brings the schema up to date and wires the
    /// Firebase and Cloudinary clients.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Internal(format!("database connection failed: {e}")))?;
        db::run_migrations(&db)
            .await
            .map_err(|e| AppError::Internal(format!("schema setup failed: {e}")))?;

        Ok(Self::new(
            db,
            Arc::new(FirebaseAuthClient::new(config.firebase_api_key.clone())),
            Arc::new(CloudinaryClient::new(
                &config.cloudinary_cloud_name,
                config.cloudinary_upload_preset.clone(),
            )),
        ))
    }
}
