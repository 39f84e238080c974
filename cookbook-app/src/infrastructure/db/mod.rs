pub mod entities;
mod favorite_repository;
mod recipe_repository;
mod review_repository;
mod user_repository;

pub use favorite_repository::FavoriteRepository;
pub use recipe_repository::RecipeRepository;
pub use review_repository::ReviewRepository;
pub use user_repository::UserRepository;

use entities::{review, Favorite, Recipe, Review, User};
use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates any missing tables from the entity definitions, parents first.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, User).await?;
    create_table(db, Recipe).await?;
    create_table(db, Favorite).await?;
    create_table(db, Review).await?;

    let backend = db.get_database_backend();
    let one_review_per_user = Index::create()
        .if_not_exists()
        .name("idx_reviews_recipe_user")
        .table(Review)
        .col(review::Column::RecipeId)
        .col(review::Column::UserId)
        .unique()
        .to_owned();
    db.execute(backend.build(&one_review_per_user)).await?;

    tracing::info!("Database schema is up to date");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}

/// Fresh in-memory SQLite database with the schema applied. A single
/// connection, since every SQLite memory connection is its own database.
#[cfg(test)]
pub(crate) async fn test_connection() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("in-memory sqlite");
    run_migrations(&db).await.expect("schema");
    db
}
