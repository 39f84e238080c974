pub mod favorite;
pub mod recipe;
pub mod review;
pub mod user;

pub use favorite::Entity as Favorite;
pub use recipe::Entity as Recipe;
pub use review::Entity as Review;
pub use user::Entity as User;
