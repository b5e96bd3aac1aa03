use std::sync::Arc;

use nbview_core::Capabilities;
use nbview_core::CodeHighlighter;
use nbview_core::MarkdownRenderer;
use nbview_core::Notebook;
use nbview_core::RenderOptions;
use nbview_core::RenderedNotebook;
use nbview_core::ValidationError;
use nbview_core::render_notebook;
use serde_json::Value;

pub type SharedHighlighter = Arc<dyn CodeHighlighter + Send + Sync>;
pub type BoxedMarkdown = Box<dyn MarkdownRenderer + Send + Sync>;

/// Owns render options and capability backends, and runs validate + render.
///
/// [`Pipeline::new`] wires whichever backends were compiled in (`markdown`, `syntect`
/// features); [`Pipeline::bare`] starts with none, so every cell renders as plain text.
pub struct Pipeline {
    options: RenderOptions,
    markdown: Option<BoxedMarkdown>,
    highlighter: Option<SharedHighlighter>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        let highlighter = default_highlighter();
        let markdown = default_markdown(highlighter.clone());
        tracing::debug!(
            markdown = markdown.is_some(),
            highlighter = highlighter.is_some(),
            "render pipeline configured"
        );
        Self {
            options: RenderOptions::default(),
            markdown,
            highlighter,
        }
    }

    pub fn bare() -> Self {
        Self {
            options: RenderOptions::default(),
            markdown: None,
            highlighter: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_markdown(&mut self, markdown: Option<BoxedMarkdown>) {
        self.markdown = markdown;
    }

    pub fn set_highlighter(&mut self, highlighter: Option<SharedHighlighter>) {
        self.highlighter = highlighter;
    }

    /// The code highlighter, for backends (like a markdown renderer) that want to share it.
    pub fn highlighter(&self) -> Option<SharedHighlighter> {
        self.highlighter.clone()
    }

    pub fn capabilities(&self) -> Capabilities<'_> {
        let mut caps = Capabilities::none();
        if let Some(markdown) = self.markdown.as_deref() {
            caps = caps.with_markdown(markdown);
        }
        if let Some(highlighter) = self.highlighter.as_deref() {
            caps = caps.with_highlighter(highlighter);
        }
        caps
    }

    /// Validates a parsed document, then renders it.
    pub fn render_value(&self, raw: Value) -> Result<RenderedNotebook, ValidationError> {
        let notebook = Notebook::from_raw(raw)?;
        Ok(self.render(&notebook))
    }

    pub fn render(&self, notebook: &Notebook) -> RenderedNotebook {
        render_notebook(notebook, self.capabilities(), &self.options)
    }
}

#[cfg(feature = "syntect")]
fn default_highlighter() -> Option<SharedHighlighter> {
    nbview_syntax::default_highlighter().map(Arc::from)
}

#[cfg(not(feature = "syntect"))]
fn default_highlighter() -> Option<SharedHighlighter> {
    None
}

#[cfg(feature = "markdown")]
fn default_markdown(highlighter: Option<SharedHighlighter>) -> Option<BoxedMarkdown> {
    let mut markdown = nbview_markdown::PulldownMarkdown::new();
    markdown.set_highlighter(highlighter);
    Some(Box::new(markdown))
}

#[cfg(not(feature = "markdown"))]
fn default_markdown(_highlighter: Option<SharedHighlighter>) -> Option<BoxedMarkdown> {
    None
}
