//! Request pipeline: validate, sanitize, generate, check tokens, then
//! substitute and highlight.
//!
//! `DocumentPipeline` is cheap to clone and holds only read-only state, so a
//! single instance serves every request concurrently.
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use crate::error::DocumentError;
use crate::generation::prompts::{corrective_instruction, DOCUMENT_SYSTEM_PROMPT, SUGGESTION_SYSTEM_PROMPT};
use crate::generation::{GenerationError, GenerationService};
use crate::input::{sanitize, validate, validate_value, InputConstraints, ValidationError};
use crate::placeholder::completeness::inspect;
use crate::placeholder::{
    highlight_with, substitute, GenerationOutcome, HighlightMarker, PlaceholderRegistry, RenderedDocument,
    SubstitutionMap, TokenDescriptor,
};
use crate::render::{MarkdownRenderer, PassthroughRenderer};

pub mod state;
pub mod suggestions;

use state::{RequestState, RequestTracker};
use suggestions::SuggestionSet;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_query_length: usize,
    pub max_suggestion_input_length: usize,
    pub timeout: Duration,
    /// Corrective follow-up calls when a draft lacks required tokens.
    pub missing_token_retries: u32,
    pub marker: HighlightMarker,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            max_query_length: 2000,
            max_suggestion_input_length: 1000,
            timeout: Duration::from_secs(60),
            missing_token_retries: 0,
            marker: HighlightMarker::default(),
        }
    }
}

/// Wire shape of `generate_document`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<TokenDescriptor>>,
}

impl From<Result<GenerationOutcome, DocumentError>> for DocumentResponse {
    fn from(result: Result<GenerationOutcome, DocumentError>) -> Self {
        match result {
            Ok(outcome) => DocumentResponse {
                success: true,
                content: Some(outcome.raw_text),
                error: None,
                missing_fields: None,
            },
            Err(DocumentError::MissingTokens(missing)) => DocumentResponse {
                success: false,
                error: Some(missing.to_string()),
                content: Some(missing.raw_text),
                missing_fields: Some(missing.missing),
            },
            Err(e) => DocumentResponse {
                success: false,
                content: None,
                error: Some(e.to_string()),
                missing_fields: None,
            },
        }
    }
}

/// Wire shape of `generate_field_suggestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<SuggestionSet, DocumentError>> for SuggestionResponse {
    fn from(result: Result<SuggestionSet, DocumentError>) -> Self {
        match result {
            Ok(set) => SuggestionResponse {
                success: true,
                suggestions: Some(set),
                error: None,
            },
            Err(e) => SuggestionResponse {
                success: false,
                suggestions: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// A complete draft with suggestions applied where available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedDocument {
    pub content: String,
    pub rendered: RenderedDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_error: Option<String>,
}

#[derive(Clone)]
pub struct DocumentPipeline {
    registry: Arc<PlaceholderRegistry>,
    drafts: Arc<dyn GenerationService>,
    suggester: Arc<dyn GenerationService>,
    renderer: Arc<dyn MarkdownRenderer>,
    settings: PipelineSettings,
}

impl DocumentPipeline {
    /// One service serves both the draft and the suggestions call until
    /// `with_suggestion_service` says otherwise.
    pub fn new(registry: Arc<PlaceholderRegistry>, service: Arc<dyn GenerationService>) -> Self {
        DocumentPipeline {
            registry,
            drafts: Arc::clone(&service),
            suggester: service,
            renderer: Arc::new(PassthroughRenderer),
            settings: PipelineSettings::default(),
        }
    }

    pub fn with_suggestion_service(mut self, service: Arc<dyn GenerationService>) -> Self {
        self.suggester = service;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(&self) -> &PlaceholderRegistry {
        &self.registry
    }

    fn document_constraints(&self) -> InputConstraints {
        InputConstraints::document_query(self.settings.max_query_length)
    }

    fn suggestion_constraints(&self) -> InputConstraints {
        InputConstraints::suggestion_input(self.settings.max_suggestion_input_length)
    }

    /// `generateDocument`: the full pipeline up to the completeness check.
    pub async fn generate_document(&self, query: &str) -> DocumentResponse {
        self.draft(query).await.into()
    }

    /// `generateFieldSuggestions`: one suggested value per required token.
    pub async fn generate_field_suggestions(&self, input: &str) -> SuggestionResponse {
        self.suggest(input).await.into()
    }

    pub async fn draft(&self, query: &str) -> Result<GenerationOutcome, DocumentError> {
        let checked = validate(query, &self.document_constraints()).map(|_| query.to_string());
        self.run_draft(checked).await
    }

    /// Same as `draft` for an untyped request field.
    pub async fn draft_json(&self, query: Option<&Value>) -> Result<GenerationOutcome, DocumentError> {
        let checked = validate_value(query, &self.document_constraints());
        self.run_draft(checked).await
    }

    async fn run_draft(&self, checked: Result<String, ValidationError>) -> Result<GenerationOutcome, DocumentError> {
        let mut tracker = RequestTracker::new();
        let span = tracing::info_span!("document_request", request_id = %tracker.id());
        async move {
            tracker.advance(RequestState::Validating);
            let query = match checked {
                Ok(q) => q,
                Err(e) => {
                    tracker.advance(RequestState::FailedValidation);
                    tracing::info!(reason = %e, "document query rejected");
                    return Err(e.into());
                }
            };
            let sanitized = sanitize(&query, self.settings.max_query_length);
            tracker.advance(RequestState::Sanitized);

            let mut user_text = sanitized;
            let mut retries_left = self.settings.missing_token_retries;
            loop {
                tracker.advance(RequestState::Generating);
                let raw = match self.call(self.drafts.as_ref(), DOCUMENT_SYSTEM_PROMPT, &user_text).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracker.advance(RequestState::FailedGeneration);
                        return Err(e.into());
                    }
                };
                tracker.advance(RequestState::Generated);

                tracker.advance(RequestState::CheckingTokens);
                let outcome = inspect(raw, &self.registry);
                if outcome.is_complete() {
                    tracker.advance(RequestState::Complete);
                    tracing::info!(tokens = outcome.present_tokens.len(), "document generated");
                    return Ok(outcome);
                }

                let missing: Vec<String> = outcome.missing_tokens.iter().map(|d| d.name.clone()).collect();
                if retries_left == 0 {
                    tracker.advance(RequestState::FailedMissingTokens);
                    tracing::warn!(missing = ?missing, "generated document is missing required tokens");
                    return outcome.into_result().map_err(DocumentError::from);
                }
                retries_left -= 1;
                tracing::info!(missing = ?missing, retries_left, "retrying with corrective instruction");
                user_text = corrective_instruction(&outcome.raw_text, &missing);
            }
        }
        .instrument(span)
        .await
    }

    pub async fn suggest(&self, input: &str) -> Result<SuggestionSet, DocumentError> {
        validate(input, &self.suggestion_constraints())?;
        self.run_suggest(input).await
    }

    pub async fn suggest_json(&self, input: Option<&Value>) -> Result<SuggestionSet, DocumentError> {
        let input = validate_value(input, &self.suggestion_constraints())?;
        self.run_suggest(&input).await
    }

    async fn run_suggest(&self, input: &str) -> Result<SuggestionSet, DocumentError> {
        let sanitized = sanitize(input, self.settings.max_suggestion_input_length);
        let raw = self
            .call(self.suggester.as_ref(), SUGGESTION_SYSTEM_PROMPT, &sanitized)
            .await?;
        let set = SuggestionSet::parse(&raw, &self.registry).map_err(|e| {
            tracing::warn!(reason = %e, "suggestions reply failed schema validation");
            e
        })?;
        Ok(set)
    }

    /// `renderWithHighlights`: substitute what is known, mark the rest and
    /// hand the markup to the renderer.
    pub async fn render_with_highlights(
        &self,
        template: &str,
        substitutions: Option<&SubstitutionMap>,
    ) -> RenderedDocument {
        let substituted = match substitutions {
            Some(values) => substitute(template, values),
            None => template.to_string(),
        };
        let highlighted = highlight_with(&substituted, &self.settings.marker);
        let markup = self.renderer.render(&highlighted.markup).await;
        RenderedDocument {
            markup,
            unresolved_tokens: highlighted.unresolved_tokens,
        }
    }

    /// Draft and suggestions run concurrently once the query passes the
    /// document checks. A failed suggestions call never fails the request;
    /// its tokens are left highlighted instead.
    pub async fn compose_document(&self, query: &str) -> Result<ComposedDocument, DocumentError> {
        if let Err(e) = validate(query, &self.document_constraints()) {
            tracing::info!(reason = %e, "compose query rejected");
            return Err(e.into());
        }
        let (draft, suggestions) = tokio::join!(self.draft(query), self.suggest(query));
        self.finish_compose(draft, suggestions).await
    }

    pub async fn compose_document_json(&self, query: Option<&Value>) -> Result<ComposedDocument, DocumentError> {
        let query = validate_value(query, &self.document_constraints()).map_err(|e| {
            tracing::info!(reason = %e, "compose query rejected");
            e
        })?;
        self.compose_document(&query).await
    }

    async fn finish_compose(
        &self,
        draft: Result<GenerationOutcome, DocumentError>,
        suggestions: Result<SuggestionSet, DocumentError>,
    ) -> Result<ComposedDocument, DocumentError> {
        let outcome = draft?;
        let (suggestions, suggestion_error) = match suggestions {
            Ok(set) => (Some(set), None),
            Err(e) => {
                tracing::warn!(reason = %e, "suggestions unavailable, leaving tokens highlighted");
                (None, Some(e.to_string()))
            }
        };
        let values = suggestions.clone().map(SuggestionSet::into_substitutions);
        let rendered = self.render_with_highlights(&outcome.raw_text, values.as_ref()).await;
        Ok(ComposedDocument {
            content: outcome.raw_text,
            rendered,
            suggestions,
            suggestion_error,
        })
    }

    /// One bounded external call. Raw provider text is logged here and goes
    /// no further.
    async fn call(
        &self,
        service: &dyn GenerationService,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.settings.timeout, service.submit(system_prompt, user_text)).await {
            Err(_) => {
                tracing::error!(timeout = ?self.settings.timeout, "generation call timed out");
                Err(GenerationError::Timeout)
            }
            Ok(Err(e)) => {
                let mapped = GenerationError::from(&e);
                tracing::error!(raw = %e, kind = ?mapped.kind(), "generation call failed");
                Err(mapped)
            }
            Ok(Ok(text)) if text.trim().is_empty() => {
                tracing::error!("generation call returned no content");
                Err(GenerationError::EmptyResponse)
            }
            Ok(Ok(text)) => Ok(text),
        }
    }
}
