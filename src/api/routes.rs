//! Router setup and shared state.
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::pipeline::DocumentPipeline;

pub struct AppState {
    pub pipeline: DocumentPipeline,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/placeholders", get(handlers::list_placeholders))
        .route("/generate_document", post(handlers::generate_document))
        .route("/field_suggestions", post(handlers::field_suggestions))
        .route("/render", post(handlers::render))
        .route("/compose", post(handlers::compose))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
