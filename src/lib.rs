pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use error::JoblyError;
pub use router::{JoblyState, jobly_router};
