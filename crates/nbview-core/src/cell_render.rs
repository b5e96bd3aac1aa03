use crate::model::Cell;
use crate::model::CellKind;
use crate::node::CellRole;
use crate::node::CodeBlock;
use crate::node::MarkdownBlock;
use crate::node::Node;
use crate::options::RenderOptions;
use crate::output_render::render_output;
use crate::text::Capabilities;

/// Renders one cell into a `Cell` root node.
///
/// `language` is the notebook-wide highlighting hint (see [`crate::Notebook::language_hint`]);
/// `None` falls back to `options.default_language`. Cells of unrecognized kind yield `None`.
///
/// Capability failures never escape: the body falls back to the plain source.
pub fn render_cell(
    cell: &Cell,
    language: Option<&str>,
    capabilities: Capabilities<'_>,
    options: &RenderOptions,
) -> Option<Node> {
    let role = match &cell.kind {
        CellKind::Code => CellRole::Code,
        CellKind::Markdown => CellRole::Markdown,
        CellKind::Other(tag) => {
            tracing::debug!(index = cell.index, cell_type = %tag, "unrecognized cell type; skipped");
            return None;
        }
    };

    let mut children = Vec::with_capacity(3);
    children.push(Node::Header {
        label: role.label(),
        number: cell.display_number(),
        execution_count: cell.execution_count,
    });

    match role {
        CellRole::Code => {
            let language = language.unwrap_or(options.default_language.as_str());
            children.push(Node::Code(code_block(cell, language, capabilities, options)));
            if let Some(outputs) = outputs_section(cell, options) {
                children.push(outputs);
            }
        }
        CellRole::Markdown => {
            children.push(Node::Markdown(markdown_block(cell, capabilities)));
        }
    }

    Some(Node::Cell {
        role,
        index: cell.index,
        children,
    })
}

fn code_block(
    cell: &Cell,
    language: &str,
    capabilities: Capabilities<'_>,
    options: &RenderOptions,
) -> CodeBlock {
    let highlighted = capabilities.highlighter.and_then(|hi| {
        let lines = cell.source.lines().count();
        if lines > options.max_highlight_lines {
            tracing::debug!(
                index = cell.index,
                lines,
                limit = options.max_highlight_lines,
                "cell too long to highlight"
            );
            return None;
        }
        match hi.highlight(language, &cell.source) {
            Ok(markup) => Some(markup),
            Err(err) => {
                tracing::warn!(index = cell.index, language, %err, "highlighting failed; showing plain code");
                None
            }
        }
    });

    CodeBlock {
        language: language.to_string(),
        source: cell.source.clone(),
        highlighted,
    }
}

fn markdown_block(cell: &Cell, capabilities: Capabilities<'_>) -> MarkdownBlock {
    let html = capabilities
        .markdown
        .and_then(|md| match md.render_markdown(&cell.source) {
            Ok(html) => Some(html),
            Err(err) => {
                tracing::warn!(index = cell.index, %err, "markdown rendering failed; showing source");
                None
            }
        });

    MarkdownBlock {
        source: cell.source.clone(),
        html,
    }
}

/// Builds the output section, or `None` when there is nothing to show under it.
fn outputs_section(cell: &Cell, options: &RenderOptions) -> Option<Node> {
    let children: Vec<Node> = cell.outputs.iter().filter_map(render_output).collect();
    if children.is_empty() {
        return None;
    }
    Some(Node::Outputs {
        label: options.outputs_label.clone(),
        children,
    })
}
