//! Env-driven configuration for the service and CLI.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for everything except the provider
//! API key.
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::generation::client::{CompletionSettings, OpenAiClient};
use crate::pipeline::{DocumentPipeline, PipelineSettings};
use crate::placeholder::PlaceholderRegistry;

pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub document_model: String,
    pub suggestion_model: String,
    pub generation_timeout: Duration,
    pub max_query_length: usize,
    pub max_suggestion_input_length: usize,
    pub missing_token_retries: u32,
    pub api_host: String,
    pub api_port: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        // MAX_CONTENT_LENGTH overrides both ceilings when set.
        let shared_max: Option<usize> = match env::var("MAX_CONTENT_LENGTH") {
            Ok(_) => Some(parse_var("MAX_CONTENT_LENGTH", 0)?),
            Err(_) => None,
        };
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            openai_base_url: var_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            document_model: var_or("DOCUMENT_MODEL", "gpt-4o"),
            suggestion_model: var_or("SUGGESTION_MODEL", "gpt-4"),
            generation_timeout: Duration::from_secs(parse_var("GENERATION_TIMEOUT_SECS", 60u64)?),
            max_query_length: match shared_max {
                Some(max) => max,
                None => parse_var("MAX_QUERY_LENGTH", 2000)?,
            },
            max_suggestion_input_length: match shared_max {
                Some(max) => max,
                None => parse_var("MAX_SUGGESTION_INPUT_LENGTH", 1000)?,
            },
            missing_token_retries: parse_var("MISSING_TOKEN_RETRIES", 0)?,
            api_host: var_or("API_HOST", "127.0.0.1"),
            api_port: var_or("API_PORT", "8190"),
        })
    }

    pub fn require_api_key(&self) -> AppResult<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))
    }

    pub fn document_settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.document_model.clone(),
            max_tokens: 2500,
            temperature: 0.7,
        }
    }

    pub fn suggestion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.suggestion_model.clone(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_query_length: self.max_query_length,
            max_suggestion_input_length: self.max_suggestion_input_length,
            timeout: self.generation_timeout,
            missing_token_retries: self.missing_token_retries,
            ..PipelineSettings::default()
        }
    }

    /// Wire the job-posting registry to two provider clients sharing one
    /// connection pool.
    pub fn build_pipeline(&self) -> AppResult<DocumentPipeline> {
        let api_key = self.require_api_key()?;
        let http = reqwest::Client::new();
        let drafts = OpenAiClient::new(http.clone(), &self.openai_base_url, api_key, self.document_settings());
        let suggester = OpenAiClient::new(http, &self.openai_base_url, api_key, self.suggestion_settings());
        Ok(
            DocumentPipeline::new(Arc::new(PlaceholderRegistry::job_posting()), Arc::new(drafts))
                .with_suggestion_service(Arc::new(suggester))
                .with_settings(self.pipeline_settings()),
        )
    }

    pub fn print_env_vars() {
        for name in [
            "OPENAI_BASE_URL",
            "DOCUMENT_MODEL",
            "SUGGESTION_MODEL",
            "GENERATION_TIMEOUT_SECS",
            "MAX_CONTENT_LENGTH",
            "MISSING_TOKEN_RETRIES",
            "API_HOST",
            "API_PORT",
        ] {
            tracing::info!("{}: {}", name, env::var(name).unwrap_or_else(|_| "<unset>".to_string()));
        }
        let key_state = if env::var("OPENAI_API_KEY").is_ok() { "<set>" } else { "<unset>" };
        tracing::info!("OPENAI_API_KEY: {}", key_state);
    }
}
