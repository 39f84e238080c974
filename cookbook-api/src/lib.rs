mod error;
mod routes;
mod session;

pub use error::ApiError;
pub use routes::create_router;
pub use session::SESSION_COOKIE;
