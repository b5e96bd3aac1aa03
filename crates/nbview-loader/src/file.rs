use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::error::Result;

pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Parsed but untyped notebook document.
pub type RawDocument = Value;

pub fn has_notebook_extension(name: &str) -> bool {
    name.ends_with(NOTEBOOK_EXTENSION)
}

/// Parses notebook JSON text.
pub fn parse_document(text: &str) -> Result<RawDocument> {
    Ok(serde_json::from_str(text)?)
}

/// Loads a dropped or uploaded file given its display name and contents.
pub fn load_bytes(name: &str, bytes: &[u8]) -> Result<RawDocument> {
    if !has_notebook_extension(name) {
        return Err(LoadError::WrongExtension(name.to_string()));
    }
    let doc = serde_json::from_slice(bytes)?;
    tracing::debug!(name, bytes = bytes.len(), "notebook parsed");
    Ok(doc)
}

/// Reads and parses a notebook from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<RawDocument> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if !has_notebook_extension(&name) {
        return Err(LoadError::WrongExtension(name));
    }

    let bytes = fs::read(path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded notebook file");
    load_bytes(&name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_wrong_extension_before_reading() {
        let err = load_path("/definitely/missing/notes.json").unwrap_err();
        assert!(matches!(err, LoadError::WrongExtension(ref n) if n == "notes.json"));

        let err = load_bytes("notebook.IPYNB", b"{}").unwrap_err();
        assert!(matches!(err, LoadError::WrongExtension(_)));
    }

    #[test]
    fn reports_malformed_json() {
        let err = load_bytes("a.ipynb", b"{\"cells\": [").unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
        assert!(err.to_string().starts_with("failed to parse notebook JSON"));
    }

    #[test]
    fn reports_missing_files_as_io() {
        let err = load_path("/definitely/missing/notes.ipynb").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn loads_notebook_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.ipynb");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(br#"{"cells": [], "nbformat": 4}"#).unwrap();

        let doc = load_path(&path).unwrap();
        assert_eq!(doc["nbformat"], 4);
    }

    #[test]
    fn parse_document_accepts_any_json() {
        assert!(parse_document("[1, 2]").unwrap().is_array());
        assert!(parse_document("not json").is_err());
    }
}
