//! Syntax highlighting backends for `nbview`.
//!
//! Backends implement [`nbview_core::CodeHighlighter`] and produce HTML markup for code cells:
//! - `syntect` (feature: `syntect`)
//!
//! The facade crate `nbview` re-exports this crate behind the same feature, so most apps can
//! just enable `nbview/syntect`.
#[cfg(feature = "syntect")]
pub mod syntect;

use nbview_core::CodeHighlighter;

/// The best highlighter compiled into this build, if any.
pub fn default_highlighter() -> Option<Box<dyn CodeHighlighter + Send + Sync>> {
    #[cfg(feature = "syntect")]
    {
        Some(Box::new(crate::syntect::SyntectHighlighter::new()))
    }
    #[cfg(not(feature = "syntect"))]
    {
        tracing::debug!("no highlighting backend compiled in");
        None
    }
}
