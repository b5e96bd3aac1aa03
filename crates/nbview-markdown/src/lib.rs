//! Markdown backend for `nbview`.
//!
//! [`PulldownMarkdown`] implements [`nbview_core::MarkdownRenderer`] on top of `pulldown-cmark`,
//! rendering markdown cells to HTML with GitHub-style extensions (tables, strikethrough,
//! footnotes, task lists).
//!
//! Fenced code blocks inside markdown can reuse the notebook's code highlighter via
//! [`PulldownMarkdown::set_highlighter`].
pub mod render;

pub use render::MarkdownOptions;
pub use render::PulldownMarkdown;
