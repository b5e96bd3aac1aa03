//! HTML surface.
//!
//! Every node becomes an element whose class names its role. Text content is escaped;
//! highlighter markup, rendered markdown and `text/html` outputs are injected as they are.
//! Stream and error text loses its ANSI colour codes.
use std::fmt::Write as _;

use nbview_core::Node;
use nbview_core::NotebookSummary;
use nbview_core::node::CellRole;
use nbview_core::text::escape_html;

use crate::ansi::strip_ansi;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}
.cell{border:1px solid #ddd;border-radius:6px;margin:1rem 0;overflow:hidden}
.cell-header{background:#f6f8fa;color:#555;font-size:.85rem;padding:.25rem .75rem}
.cell-body{padding:.5rem .75rem}
.cell-code pre{margin:0;overflow-x:auto}
.outputs{border-top:1px dashed #ddd;padding:.5rem .75rem}
.outputs-header{color:#888;font-size:.8rem;font-style:italic}
.output-stream-stderr{background:#fff5f5}
.output-error{background:#fdecec;color:#a00}
.output-image img{max-width:100%}
.placeholder{color:#888;text-align:center}
.summary{color:#555;font-size:.9rem}
";

/// Renders nodes as an HTML fragment, suitable for embedding.
pub fn render_fragment(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_node(node, &mut out);
    }
    out
}

/// Renders a standalone HTML page, with an optional summary line above the cells.
pub fn render_document(title: &str, nodes: &[Node], summary: Option<&NotebookSummary>) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    let _ = writeln!(out, "<style>\n{STYLE}</style>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));
    if let Some(summary) = summary {
        push_summary(summary, &mut out);
    }
    out.push_str("<main class=\"notebook\">\n");
    out.push_str(&render_fragment(nodes));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn push_summary(summary: &NotebookSummary, out: &mut String) {
    let _ = write!(
        out,
        "<p class=\"summary\">{} cells ({} code, {} markdown)",
        summary.cells, summary.code_cells, summary.markdown_cells
    );
    if let Some(kernel) = summary.kernel_display_name.as_deref() {
        let _ = write!(out, " · kernel: {}", escape_html(kernel));
    }
    if let Some(language) = summary.language.as_deref() {
        let _ = write!(out, " · language: {}", escape_html(language));
    }
    out.push_str("</p>\n");
}

fn push_node(node: &Node, out: &mut String) {
    match node {
        Node::Placeholder { message } => {
            let _ = writeln!(out, "<div class=\"placeholder\">{}</div>", escape_html(message));
        }
        Node::Cell {
            role,
            index,
            children,
        } => {
            let kind = match role {
                CellRole::Code => "cell-code",
                CellRole::Markdown => "cell-markdown",
            };
            let _ = writeln!(out, "<section class=\"cell {kind}\" data-index=\"{index}\">");
            for child in children {
                push_node(child, out);
            }
            out.push_str("</section>\n");
        }
        Node::Header {
            label,
            number,
            execution_count,
        } => {
            let _ = write!(out, "<div class=\"cell-header\">{label} [{number}]");
            if let Some(count) = execution_count {
                let _ = write!(out, " <span class=\"execution-count\">In [{count}]</span>");
            }
            out.push_str("</div>\n");
        }
        Node::Code(code) => {
            let body = match code.highlighted.as_deref() {
                Some(markup) => markup.to_string(),
                None => escape_html(&code.source),
            };
            let _ = writeln!(
                out,
                "<div class=\"cell-body\"><pre><code class=\"language-{}\">{body}</code></pre></div>",
                escape_html(&code.language)
            );
        }
        Node::Markdown(md) => match md.html.as_deref() {
            Some(html) => {
                let _ = writeln!(out, "<div class=\"cell-body markdown\">{html}</div>");
            }
            None => {
                let _ = writeln!(
                    out,
                    "<div class=\"cell-body markdown\"><pre>{}</pre></div>",
                    escape_html(&md.source)
                );
            }
        },
        Node::Outputs { label, children } => {
            out.push_str("<div class=\"outputs\">\n");
            let _ = writeln!(out, "<div class=\"outputs-header\">{}</div>", escape_html(label));
            for child in children {
                push_node(child, out);
            }
            out.push_str("</div>\n");
        }
        Node::Stream { name, text } => {
            let class = match name.as_deref() {
                Some(name) => format!("output-stream output-stream-{}", escape_html(name)),
                None => "output-stream".to_string(),
            };
            let _ = writeln!(
                out,
                "<pre class=\"{class}\">{}</pre>",
                escape_html(&strip_ansi(text))
            );
        }
        Node::Text { text } => {
            let _ = writeln!(out, "<pre class=\"output-text\">{}</pre>", escape_html(text));
        }
        Node::Html { markup } => {
            let _ = writeln!(out, "<div class=\"output-html\">{markup}</div>");
        }
        Node::Image { mime, src } => {
            let _ = writeln!(
                out,
                "<div class=\"output-image\"><img src=\"{}\" alt=\"{}\"></div>",
                escape_html(src),
                escape_html(mime)
            );
        }
        Node::Error { ename, text, .. } => {
            let _ = write!(out, "<pre class=\"output-error\"");
            if let Some(ename) = ename.as_deref() {
                let _ = write!(out, " data-ename=\"{}\"", escape_html(ename));
            }
            let _ = writeln!(out, ">{}</pre>", escape_html(&strip_ansi(text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbview_core::node::CodeBlock;
    use nbview_core::node::MarkdownBlock;

    #[test]
    fn escapes_text_and_injects_markup() {
        let nodes = [Node::Cell {
            role: CellRole::Code,
            index: 0,
            children: vec![
                Node::Header {
                    label: "Code",
                    number: 1,
                    execution_count: None,
                },
                Node::Code(CodeBlock {
                    language: "python".into(),
                    source: "a < b".into(),
                    highlighted: None,
                }),
                Node::Outputs {
                    label: "Output".into(),
                    children: vec![
                        Node::Html {
                            markup: "<b>bold</b>".into(),
                        },
                        Node::Stream {
                            name: Some("stderr".into()),
                            text: "<warn>".into(),
                        },
                    ],
                },
            ],
        }];

        let html = render_fragment(&nodes);
        assert!(html.contains("<section class=\"cell cell-code\" data-index=\"0\">"));
        assert!(html.contains("<div class=\"cell-header\">Code [1]</div>"));
        assert!(html.contains("<code class=\"language-python\">a &lt; b</code>"));
        assert!(html.contains("<div class=\"output-html\"><b>bold</b></div>"));
        assert!(html.contains("<pre class=\"output-stream output-stream-stderr\">&lt;warn&gt;</pre>"));
    }

    #[test]
    fn prefers_highlighted_and_rendered_markup() {
        let nodes = [
            Node::Code(CodeBlock {
                language: "rust".into(),
                source: "fn main() {}".into(),
                highlighted: Some("<span>fn</span>".into()),
            }),
            Node::Markdown(MarkdownBlock {
                source: "# Hi".into(),
                html: Some("<h1>Hi</h1>".into()),
            }),
            Node::Markdown(MarkdownBlock {
                source: "<raw>".into(),
                html: None,
            }),
        ];
        let html = render_fragment(&nodes);
        assert!(html.contains("<span>fn</span>"));
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<pre>&lt;raw&gt;</pre>"));
    }

    #[test]
    fn images_and_errors_get_role_classes() {
        let nodes = [
            Node::Image {
                mime: "image/png".into(),
                src: "data:image/png;base64,Zm9v".into(),
            },
            Node::Error {
                ename: Some("ValueError".into()),
                evalue: Some("bad".into()),
                text: "line1\nline2".into(),
            },
        ];
        let html = render_fragment(&nodes);
        assert!(html.contains("<img src=\"data:image/png;base64,Zm9v\" alt=\"image/png\">"));
        assert!(html.contains("<pre class=\"output-error\" data-ename=\"ValueError\">line1\nline2</pre>"));
    }

    #[test]
    fn colour_codes_are_stripped_from_tracebacks_and_streams() {
        let nodes = [
            Node::Error {
                ename: Some("ValueError".into()),
                evalue: Some("bad".into()),
                text: "\u{1b}[0;31mValueError\u{1b}[0m: bad".into(),
            },
            Node::Stream {
                name: Some("stderr".into()),
                text: "\u{1b}[33mwarn\u{1b}[0m\n".into(),
            },
        ];
        let html = render_fragment(&nodes);
        assert!(!html.contains('\u{1b}'));
        assert!(!html.contains("[0;31m"));
        assert!(html.contains(">ValueError: bad</pre>"));
        assert!(html.contains(">warn\n</pre>"));
    }

    #[test]
    fn document_wraps_fragment_with_title_and_summary() {
        let summary = NotebookSummary {
            cells: 2,
            code_cells: 1,
            markdown_cells: 1,
            kernel_display_name: Some("Python 3".into()),
            language: Some("python".into()),
        };
        let nodes = [Node::Placeholder {
            message: "No cells found".into(),
        }];
        let page = render_document("a & b", &nodes, Some(&summary));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>a &amp; b</title>"));
        assert!(page.contains("2 cells (1 code, 1 markdown) · kernel: Python 3 · language: python"));
        assert!(page.contains("<div class=\"placeholder\">No cells found</div>"));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
