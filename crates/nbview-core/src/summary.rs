use crate::model::CellKind;
use crate::model::Notebook;

/// At-a-glance facts about a notebook, for an info panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotebookSummary {
    pub cells: usize,
    pub code_cells: usize,
    pub markdown_cells: usize,
    pub kernel_display_name: Option<String>,
    pub language: Option<String>,
}

impl NotebookSummary {
    pub fn of(notebook: &Notebook) -> Self {
        let count = |kind: CellKind| notebook.cells.iter().filter(|c| c.kind == kind).count();
        let kernelspec = notebook.metadata.kernelspec.as_ref();

        Self {
            cells: notebook.cells.len(),
            code_cells: count(CellKind::Code),
            markdown_cells: count(CellKind::Markdown),
            kernel_display_name: kernelspec.and_then(|k| k.display_name.clone()),
            language: kernelspec.and_then(|k| k.language.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_cells_by_kind() {
        let nb = Notebook::from_raw(json!({
            "metadata": {"kernelspec": {"display_name": "Python 3", "language": "python"}},
            "cells": [
                {"cell_type": "code", "source": ""},
                {"cell_type": "markdown", "source": ""},
                {"cell_type": "code", "source": ""},
                {"cell_type": "raw", "source": ""}
            ]
        }))
        .unwrap();

        assert_eq!(
            NotebookSummary::of(&nb),
            NotebookSummary {
                cells: 4,
                code_cells: 2,
                markdown_cells: 1,
                kernel_display_name: Some("Python 3".into()),
                language: Some("python".into()),
            }
        );
    }

    #[test]
    fn empty_notebook_has_no_hints() {
        let summary = NotebookSummary::of(&Notebook::default());
        assert_eq!(summary, NotebookSummary::default());
    }
}
