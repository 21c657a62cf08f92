//! Deterministic generation doubles shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jobdesc_templates::generation::{GenerationService, ProviderError};
use jobdesc_templates::pipeline::PipelineSettings;
use jobdesc_templates::{DocumentPipeline, PlaceholderRegistry};

pub const COMPLETE_DRAFT: &str = "# {{job_title}}\n\n\
**Location:** {{working_location}}, {{country}}\n\n\
## Job Summary\nYou will build data products.\n\n\
## Contact\nQuestions? Write to {{contact_email}}.";

pub const DRAFT_WITHOUT_EMAIL: &str = "# {{job_title}}\n\n\
**Location:** {{working_location}}, {{country}}\n\n\
## Job Summary\nYou will build data products.";

pub const SUGGESTIONS_JSON: &str = r#"{
    "job_title": "Data Scientist",
    "contact_email": "careers@example.com",
    "country": "Germany",
    "working_location": "Hybrid"
}"#;

/// Replies from a queue, one entry per call, and records what it was sent.
pub struct ScriptedService {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(ScriptedService {
            replies: Mutex::new(replies.into()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(raw: &str) -> Arc<Self> {
        Self::new(vec![Err(ProviderError::Call(raw.to_string()))])
    }

    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(ScriptedService {
            replies: Mutex::new(vec![Ok(text.to_string())].into()),
            delay: Some(delay),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn user_texts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, user)| user.clone()).collect()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn submit(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_text.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Call("script exhausted".to_string())))
    }
}

pub fn pipeline_with(drafts: Arc<ScriptedService>, suggester: Arc<ScriptedService>) -> DocumentPipeline {
    DocumentPipeline::new(Arc::new(PlaceholderRegistry::job_posting()), drafts).with_suggestion_service(suggester)
}

pub fn fast_timeout() -> PipelineSettings {
    PipelineSettings {
        timeout: Duration::from_millis(50),
        ..PipelineSettings::default()
    }
}
