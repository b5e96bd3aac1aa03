use crate::cell_render::render_cell;
use crate::model::Notebook;
use crate::node::Node;
use crate::node::Role;
use crate::options::RenderOptions;
use crate::text::Capabilities;

/// The presentation of one notebook: one root node per rendered cell, in notebook order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedNotebook {
    pub nodes: Vec<Node>,
}

impl RenderedNotebook {
    /// Whether this is the "no cells" placeholder rendering.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.nodes.as_slice(), [node] if node.role() == Role::Placeholder)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.role() == Role::Cell)
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Renders a whole notebook.
///
/// The notebook is passed in explicitly; nothing is cached between calls. An empty notebook
/// renders as a single placeholder node.
///
/// ```rust
/// use nbview_core::{Capabilities, Notebook, RenderOptions, render_notebook};
///
/// let raw = serde_json::json!({"cells": [{"cell_type": "code", "source": "1 + 1"}]});
/// let notebook = Notebook::from_raw(raw).unwrap();
/// let rendered = render_notebook(&notebook, Capabilities::none(), &RenderOptions::default());
/// assert_eq!(rendered.cells().count(), 1);
/// ```
pub fn render_notebook(
    notebook: &Notebook,
    capabilities: Capabilities<'_>,
    options: &RenderOptions,
) -> RenderedNotebook {
    if notebook.is_empty() {
        return RenderedNotebook {
            nodes: vec![Node::Placeholder {
                message: options.empty_message.clone(),
            }],
        };
    }

    let language = notebook.language_hint();
    let nodes: Vec<Node> = notebook
        .cells
        .iter()
        .filter_map(|cell| render_cell(cell, language, capabilities, options))
        .collect();

    tracing::debug!(
        cells = notebook.cells.len(),
        rendered = nodes.len(),
        "notebook rendered"
    );
    RenderedNotebook { nodes }
}
