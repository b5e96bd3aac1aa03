//! Typed, normalized notebook model.
//!
//! Built once from a raw JSON document by [`Notebook::from_raw`]. After that the model is
//! read-only: cell order is presentation order and indices never shift.
use std::collections::BTreeMap;
use std::fmt;

use serde_json::Map;
use serde_json::Value;

use crate::error::Result;
use crate::error::ValidationError;
use crate::error::kind_name;
use crate::normalize::normalize_document;
use crate::normalize::normalize_multiline;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
}

/// Notebook-level metadata. The raw map is kept as-is; only kernel hints are lifted out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotebookMetadata {
    pub kernelspec: Option<KernelSpec>,
    /// `metadata.language_info.name`, when the producer recorded it.
    pub language_info_name: Option<String>,
    pub raw: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelSpec {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// 0-based position in the notebook.
    pub index: usize,
    pub kind: CellKind,
    pub source: String,
    pub outputs: Vec<Output>,
    pub execution_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
    /// Any other `cell_type` (`raw`, typos, missing). Kept for index continuity, never rendered.
    Other(String),
}

impl CellKind {
    fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("code") => Self::Code,
            Some("markdown") => Self::Markdown,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => f.write_str("code"),
            Self::Markdown => f.write_str("markdown"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    Stream {
        /// `stdout` / `stderr`.
        name: Option<String>,
        text: String,
    },
    ExecuteResult {
        data: Option<MimeBundle>,
        execution_count: Option<u64>,
    },
    DisplayData {
        data: Option<MimeBundle>,
    },
    Error {
        ename: Option<String>,
        evalue: Option<String>,
        traceback: Option<Vec<String>>,
    },
    Unknown {
        output_type: Option<String>,
    },
}

/// A `data` mapping of one rich output: MIME type to payload.
pub type MimeBundle = BTreeMap<String, MimeData>;

#[derive(Clone, Debug, PartialEq)]
pub enum MimeData {
    /// A string payload (arrays already joined): text, markup, or base64.
    Text(String),
    /// Anything else, e.g. `application/json` objects.
    Json(Value),
}

impl MimeData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(_) => None,
        }
    }
}

impl Notebook {
    /// Validates and normalizes a raw document into the typed model.
    ///
    /// A missing or empty `cells` field produces an empty notebook rather than an error.
    pub fn from_raw(mut raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(ValidationError::NotAnObject(kind_name(&raw)));
        }
        if let Some(cells) = raw.get("cells") {
            if !cells.is_array() && !cells.is_null() {
                return Err(ValidationError::CellsNotArray(kind_name(cells)));
            }
        }

        normalize_document(&mut raw);

        let metadata = raw
            .get("metadata")
            .and_then(Value::as_object)
            .map(NotebookMetadata::from_map)
            .unwrap_or_default();

        let cells = raw
            .get("cells")
            .and_then(Value::as_array)
            .map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(index, cell)| Cell::from_value(index, cell))
                    .collect()
            })
            .unwrap_or_default();

        let notebook = Self { cells, metadata };
        tracing::debug!(cells = notebook.cells.len(), "notebook validated");
        Ok(notebook)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Language hint for code cells: kernelspec language, then `language_info.name`.
    pub fn language_hint(&self) -> Option<&str> {
        self.metadata
            .kernelspec
            .as_ref()
            .and_then(|k| k.language.as_deref())
            .or(self.metadata.language_info_name.as_deref())
    }
}

impl NotebookMetadata {
    fn from_map(map: &Map<String, Value>) -> Self {
        let kernelspec = map
            .get("kernelspec")
            .and_then(Value::as_object)
            .map(|k| KernelSpec {
                name: string_field(k, "name"),
                display_name: string_field(k, "display_name"),
                language: string_field(k, "language"),
            });
        let language_info_name = map
            .get("language_info")
            .and_then(Value::as_object)
            .and_then(|info| string_field(info, "name"));

        Self {
            kernelspec,
            language_info_name,
            raw: map.clone(),
        }
    }
}

impl Cell {
    fn from_value(index: usize, value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::debug!(index, "cell is not an object; keeping it as an unknown cell");
            return Self {
                index,
                kind: CellKind::Other(String::new()),
                source: String::new(),
                outputs: Vec::new(),
                execution_count: None,
            };
        };

        let kind = CellKind::from_tag(obj.get("cell_type").and_then(Value::as_str));
        let source = obj
            .get("source")
            .and_then(normalize_multiline)
            .unwrap_or_default();
        let outputs = match kind {
            CellKind::Code => obj
                .get("outputs")
                .and_then(Value::as_array)
                .map(|outs| outs.iter().map(Output::from_value).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        Self {
            index,
            kind,
            source,
            outputs,
            execution_count: obj.get("execution_count").and_then(Value::as_u64),
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == CellKind::Code
    }

    /// 1-based number shown in headers.
    pub fn display_number(&self) -> usize {
        self.index + 1
    }
}

impl Output {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Unknown { output_type: None };
        };
        let output_type = obj.get("output_type").and_then(Value::as_str);

        match output_type {
            Some("stream") => Self::Stream {
                name: string_field(obj, "name"),
                text: obj
                    .get("text")
                    .and_then(normalize_multiline)
                    .unwrap_or_default(),
            },
            Some("execute_result") => Self::ExecuteResult {
                data: mime_bundle(obj.get("data")),
                execution_count: obj.get("execution_count").and_then(Value::as_u64),
            },
            Some("display_data") => Self::DisplayData {
                data: mime_bundle(obj.get("data")),
            },
            Some("error") => Self::Error {
                ename: string_field(obj, "ename"),
                evalue: string_field(obj, "evalue"),
                traceback: obj.get("traceback").and_then(Value::as_array).map(|lines| {
                    lines
                        .iter()
                        .filter_map(|l| l.as_str().map(str::to_string))
                        .collect()
                }),
            },
            other => Self::Unknown {
                output_type: other.map(str::to_string),
            },
        }
    }

    pub fn output_type(&self) -> &str {
        match self {
            Self::Stream { .. } => "stream",
            Self::ExecuteResult { .. } => "execute_result",
            Self::DisplayData { .. } => "display_data",
            Self::Error { .. } => "error",
            Self::Unknown { output_type } => output_type.as_deref().unwrap_or(""),
        }
    }
}

fn mime_bundle(value: Option<&Value>) -> Option<MimeBundle> {
    let map = value?.as_object()?;
    Some(
        map.iter()
            .map(|(mime, payload)| {
                let data = match normalize_multiline(payload) {
                    Some(text) => MimeData::Text(text),
                    None => MimeData::Json(payload.clone()),
                };
                (mime.clone(), data)
            })
            .collect(),
    )
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
