//! Axum request handlers for the HTTP API.
//!
//! Every failure body has the same shape as the success body with
//! `success: false`, so clients can branch on one field.
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::error::DocumentError;
use crate::generation::GenerationError;
use crate::pipeline::{DocumentResponse, SuggestionResponse};
use crate::placeholder::SubstitutionMap;

pub async fn root() -> &'static str {
    "Job Description Template API"
}

fn status_for(err: &DocumentError) -> StatusCode {
    match err {
        DocumentError::Validation(_) => StatusCode::BAD_REQUEST,
        DocumentError::MissingTokens(_) | DocumentError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentError::Generation(GenerationError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
        DocumentError::Generation(GenerationError::RateLimit) => StatusCode::TOO_MANY_REQUESTS,
        DocumentError::Generation(_) => StatusCode::BAD_GATEWAY,
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": message})),
    )
        .into_response()
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::info!(reason = %rejection.body_text(), "request body rejected");
            Err(bad_request("Request body must be valid JSON"))
        }
    }
}

pub async fn list_placeholders(State(state): State<Arc<AppState>>) -> Json<Value> {
    let registry = state.pipeline.registry();
    let tokens: Vec<Value> = registry
        .descriptors()
        .iter()
        .map(|d| {
            json!({
                "name": d.name,
                "displayLabel": d.display_label,
                "description": d.description,
                "required": registry.is_required(&d.name),
            })
        })
        .collect();
    Json(json!({ "placeholders": tokens, "required": registry.required_names() }))
}

pub async fn generate_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(value) => value,
        Err(resp) => return resp,
    };
    let result = state.pipeline.draft_json(payload.get("query")).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    (status, Json(DocumentResponse::from(result))).into_response()
}

pub async fn field_suggestions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(value) => value,
        Err(resp) => return resp,
    };
    let result = state.pipeline.suggest_json(payload.get("input")).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    (status, Json(SuggestionResponse::from(result))).into_response()
}

pub async fn render(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(value) => value,
        Err(resp) => return resp,
    };
    let Some(template) = payload.get("template").and_then(Value::as_str) else {
        return bad_request("Template is required");
    };
    let substitutions = match payload.get("substitutions") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<SubstitutionMap>(raw.clone()) {
            Ok(map) => Some(map),
            Err(_) => return bad_request("Substitutions must be an object of strings"),
        },
    };
    let rendered = state
        .pipeline
        .render_with_highlights(template, substitutions.as_ref())
        .await;
    (StatusCode::OK, Json(rendered)).into_response()
}

pub async fn compose(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(value) => value,
        Err(resp) => return resp,
    };
    match state.pipeline.compose_document_json(payload.get("query")).await {
        Ok(doc) => (StatusCode::OK, Json(json!({"success": true, "document": doc}))).into_response(),
        Err(e) => {
            let status = status_for(&e);
            (status, Json(DocumentResponse::from(Err(e)))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validator::ValidationError;
    use crate::pipeline::suggestions::SchemaError;
    use crate::placeholder::MissingTokenError;

    #[test]
    fn failures_map_to_distinct_statuses() {
        assert_eq!(
            status_for(&ValidationError::SuspiciousContent { noun: "query" }.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&MissingTokenError { raw_text: String::new(), missing: vec![] }.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&SchemaError::NotJson.into()), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(&GenerationError::Timeout.into()), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(status_for(&GenerationError::RateLimit.into()), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&GenerationError::Auth.into()), StatusCode::BAD_GATEWAY);
    }
}
