mod authenticate;
mod browse_recipes;
mod cooking_timer;
mod manage_recipes;
mod review_recipe;
mod toggle_favorite;

pub use authenticate::Accounts;
pub use browse_recipes::RecipeBrowser;
pub use cooking_timer::{CookingTimer, TimerFinished};
pub use manage_recipes::RecipeCatalog;
pub use review_recipe::{RecipeReviews, ReviewLedger};
pub use toggle_favorite::FavoritesLedger;

use cookbook_errors::AppError;
use sea_orm::DbErr;

/// Store failures surface to callers as remote failures.
fn store_error(err: DbErr) -> AppError {
    tracing::error!("Database error: {}", err);
    AppError::remote(err)
}
