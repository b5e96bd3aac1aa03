use std::sync::Arc;

use nbview_core::text::CapabilityError;
use nbview_core::text::CodeHighlighter;
use nbview_core::text::MarkdownRenderer;
use nbview_core::text::escape_html;
use pulldown_cmark::CodeBlockKind;
use pulldown_cmark::CowStr;
use pulldown_cmark::Event;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use pulldown_cmark::TagEnd;
use pulldown_cmark::html;
use url::Url;

/// Extensions and link handling for [`PulldownMarkdown`].
#[derive(Clone, Debug)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
    /// Relative link and image destinations are resolved against this URL (e.g. the raw URL
    /// of the notebook's directory when it was fetched remotely).
    pub base_url: Option<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
            tasklists: true,
            base_url: None,
        }
    }
}

impl MarkdownOptions {
    fn parser_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.tasklists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Markdown-to-HTML backend built on `pulldown-cmark`.
///
/// Fenced code blocks are passed through an optional [`CodeHighlighter`]; without one (or when
/// it fails) they render as plain `<pre><code>` blocks.
#[derive(Clone, Default)]
pub struct PulldownMarkdown {
    options: MarkdownOptions,
    highlighter: Option<Arc<dyn CodeHighlighter + Send + Sync>>,
}

impl PulldownMarkdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MarkdownOptions) -> Self {
        Self {
            options,
            highlighter: None,
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    pub fn set_base_url(&mut self, base_url: Option<String>) {
        self.options.base_url = base_url;
    }

    pub fn set_highlighter(&mut self, highlighter: Option<Arc<dyn CodeHighlighter + Send + Sync>>) {
        self.highlighter = highlighter;
    }

    /// Renders `source` to HTML. Never fails; see [`MarkdownRenderer`] for the trait entry.
    pub fn to_html(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options.parser_options());
        let base_url = self.options.base_url.as_deref();

        let mut events: Vec<Event<'_>> = Vec::new();
        let mut fence: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    fence = Some((language, String::new()));
                }
                Event::Text(text) if fence.is_some() => {
                    if let Some((_, code)) = fence.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, code)) = fence.take() {
                        events.push(Event::Html(self.code_block_html(language.as_deref(), &code).into()));
                    }
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: resolve(base_url, dest_url),
                    title,
                    id,
                })),
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => events.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url: resolve(base_url, dest_url),
                    title,
                    id,
                })),
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn code_block_html(&self, language: Option<&str>, code: &str) -> String {
        let class = language
            .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
            .unwrap_or_default();

        let body = match (&self.highlighter, language) {
            (Some(hi), Some(lang)) => hi.highlight(lang, code).unwrap_or_else(|err| {
                tracing::debug!(language = lang, %err, "fenced block not highlighted");
                escape_html(code)
            }),
            _ => escape_html(code),
        };
        format!("<pre><code{class}>{body}</code></pre>\n")
    }
}

impl MarkdownRenderer for PulldownMarkdown {
    fn render_markdown(&self, source: &str) -> Result<String, CapabilityError> {
        Ok(self.to_html(source))
    }
}

fn fence_language(info: &str) -> Option<String> {
    let lang = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or("")
        .trim();
    (!lang.is_empty()).then(|| lang.to_ascii_lowercase())
}

fn resolve<'a>(base_url: Option<&str>, dest: CowStr<'a>) -> CowStr<'a> {
    match resolve_url(base_url, &dest) {
        Some(resolved) => resolved.into(),
        None => dest,
    }
}

/// Joins a relative destination onto `base_url`. Returns `None` when nothing changes.
fn resolve_url(base_url: Option<&str>, dest: &str) -> Option<String> {
    let dest = dest.trim();
    if dest.is_empty() || is_absolute_url(dest) {
        return None;
    }
    let base = base_url.map(str::trim).filter(|s| !s.is_empty())?;
    let base = Url::parse(base).ok()?;
    base.join(dest).ok().map(|u| u.to_string())
}

fn is_absolute_url(dest: &str) -> bool {
    dest.starts_with('#')
        || dest.starts_with("mailto:")
        || dest.starts_with("data:")
        || dest.starts_with("http://")
        || dest.starts_with("https://")
        || dest.starts_with("file://")
        || dest.starts_with('/')
}
