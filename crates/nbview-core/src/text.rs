use thiserror::Error;

/// Failure reported by an injected markdown or highlighting backend.
///
/// Renderers never propagate this: the cell falls back to its plain source.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("no syntax definition for language `{0}`")]
    UnsupportedLanguage(String),
    #[error("{backend} failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}

impl CapabilityError {
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }
}

/// Turns code into highlighted markup.
pub trait CodeHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, CapabilityError>;

    fn supports_language(&self, _language: &str) -> bool {
        true
    }
}

/// Turns markdown source into HTML.
pub trait MarkdownRenderer {
    fn render_markdown(&self, source: &str) -> Result<String, CapabilityError>;
}

/// Highlighter that only escapes the code for embedding as markup.
pub struct NoHighlight;

impl CodeHighlighter for NoHighlight {
    fn highlight(&self, _language: &str, code: &str) -> Result<String, CapabilityError> {
        Ok(escape_html(code))
    }
}

/// The pair of capabilities a render pass may use.
///
/// Either side can be missing; cells then render their plain source.
#[derive(Clone, Copy, Default)]
pub struct Capabilities<'a> {
    pub markdown: Option<&'a dyn MarkdownRenderer>,
    pub highlighter: Option<&'a dyn CodeHighlighter>,
}

impl<'a> Capabilities<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_markdown(mut self, markdown: &'a dyn MarkdownRenderer) -> Self {
        self.markdown = Some(markdown);
        self
    }

    pub fn with_highlighter(mut self, highlighter: &'a dyn CodeHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
