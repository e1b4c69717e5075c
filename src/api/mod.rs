//! API layer - HTTP endpoints and extractors

pub mod admin;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::RequireCaller;
pub use router::create_router;
pub use state::AppState;
