//! HTTP surface: axum router and JSON handlers.
pub mod handlers;
pub mod routes;

pub use routes::{router, AppState};
