//! Document loading for `nbview`.
//!
//! A loader turns a user's file, a drop payload, or a GitHub path into a parsed-but-untyped
//! [`RawDocument`], or a single human-readable [`LoadError`]. Validation and rendering happen
//! in `nbview-core`.
//!
//! ```rust,no_run
//! let raw = nbview_loader::load_path("analysis.ipynb")?;
//! # Ok::<(), nbview_loader::LoadError>(())
//! ```
pub mod error;
pub mod file;
pub mod github;

pub use error::LoadError;
pub use file::RawDocument;
pub use file::load_bytes;
pub use file::load_path;
pub use file::parse_document;
pub use github::GithubSource;
pub use github::RepoRef;
pub use github::Transport;
#[cfg(feature = "http")]
pub use github::UreqTransport;
