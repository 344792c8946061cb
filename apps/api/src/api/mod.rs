// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AiStatus, AppState};
