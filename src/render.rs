//! Markup-to-rich-text seam.
//!
//! Markdown parsing happens outside this crate (the browser renders the
//! markup). The trait exists so a server-side renderer can be plugged in.
use async_trait::async_trait;

#[async_trait]
pub trait MarkdownRenderer: Send + Sync {
    async fn render(&self, markup: &str) -> String;
}

/// Returns the highlight-annotated markup unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

#[async_trait]
impl MarkdownRenderer for PassthroughRenderer {
    async fn render(&self, markup: &str) -> String {
        markup.to_string()
    }
}
