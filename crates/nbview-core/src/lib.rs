//! `nbview-core` turns notebook documents (`.ipynb`) into a renderer-agnostic presentation tree.
//!
//! The crate has no opinion on how the tree is displayed, and it does not parse markdown or
//! highlight code itself: both are injected as [`text::Capabilities`]. Backends live in
//! separate crates (`nbview-markdown`, `nbview-syntax`).
//!
//! ## Pipeline
//!
//! 1. [`Notebook::from_raw`]: validate a parsed JSON document and normalize every
//!    string-or-array field into a single string.
//! 2. [`render_notebook`]: map each cell to a [`Node`] tree (header, body, outputs).
//! 3. [`output_render::render_output`]: map each output record, choosing one rich
//!    representation by [`output_render::MIME_PRIORITY`].
//!
//! All render stages are pure and synchronous. Malformed outputs are skipped, and capability
//! failures fall back to plain text; only [`ValidationError`] is ever returned.
pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod text;

pub mod node;

pub mod cell_render;
pub mod output_render;
pub mod render;
pub mod summary;

pub use error::ValidationError;
pub use model::Cell;
pub use model::CellKind;
pub use model::MimeBundle;
pub use model::MimeData;
pub use model::Notebook;
pub use model::Output;
pub use node::Node;
pub use node::Role;
pub use options::RenderOptions;
pub use render::RenderedNotebook;
pub use render::render_notebook;
pub use summary::NotebookSummary;
pub use text::Capabilities;
pub use text::CapabilityError;
pub use text::CodeHighlighter;
pub use text::MarkdownRenderer;
