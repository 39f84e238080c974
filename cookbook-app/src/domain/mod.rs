mod cooking_timer;
mod favorite;
mod image;
mod recipe;
mod recipe_query;
mod review;
mod user;

#[cfg(test)]
pub(crate) use recipe::fixtures;

pub use cooking_timer::{format_clock, TickOutcome, TimerPhase, TimerState};
pub use favorite::{FavoriteEntry, FavoriteStatus};
pub use image::ImageUpload;
pub use recipe::{
    CollectionStats, Difficulty, NewRecipe, Recipe, RecipeDraft, RecipePatch, MAX_COOKING_TIME,
};
pub use recipe_query::{DifficultyFilter, RecipeQuery, TimeFilter};
pub use review::{RatingSummary, Review, ReviewInput, MAX_RATING, MIN_RATING};
pub use user::{AuthContext, AuthUser, User};
