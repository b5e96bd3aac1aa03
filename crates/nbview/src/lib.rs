//! Render Jupyter notebooks (`.ipynb`) to HTML or to `ratatui` text.
//!
//! ```rust
//! use nbview::Pipeline;
//!
//! let raw = serde_json::json!({"cells": [{"cell_type": "markdown", "source": ["# Hi"]}]});
//! let rendered = Pipeline::new().render_value(raw)?;
//! let page = nbview::html::render_fragment(&rendered.nodes);
//! assert!(page.contains("cell-markdown"));
//! # Ok::<(), nbview::core::ValidationError>(())
//! ```
pub mod ansi;
pub mod theme;

pub mod html;
pub mod pipeline;
pub mod terminal;

pub use nbview_core as core;
pub use pipeline::Pipeline;

#[cfg(feature = "loader")]
pub use nbview_loader as loader;
#[cfg(feature = "markdown")]
pub use nbview_markdown as markdown;
#[cfg(feature = "syntect")]
pub use nbview_syntax as syntax;
