pub mod auth;
pub mod extract;

pub use auth::RequireAdmin;
pub use extract::{FilterQuery, JsonBody, PathParam};
