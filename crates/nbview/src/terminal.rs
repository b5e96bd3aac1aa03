//! Terminal surface: presentation nodes to styled `ratatui` text.
//!
//! Highlighter and markdown markup is HTML, which a terminal cannot show, so this surface works
//! from each node's plain content: code and markdown from their source, rich HTML outputs
//! reduced to text, images as a short `[image/png]` marker.
use nbview_core::Node;
use nbview_core::node::CellRole;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use unicode_width::UnicodeWidthStr;

use crate::ansi::ansi_text;
use crate::theme::Theme;

const RULE: &str = "─";
const INDENT: &str = "  ";

/// Renders nodes into a fully materialized [`Text`], one blank line between cells.
///
/// `width` only affects the header rules; long lines are left for the caller to wrap.
pub fn notebook_text(nodes: &[Node], theme: &Theme, width: u16) -> Text<'static> {
    let mut lines = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        push_node(node, theme, width, &mut lines);
    }
    Text::from(lines)
}

/// Plain-text rendering, handy for logs and snapshot tests.
pub fn notebook_plain(nodes: &[Node], width: u16) -> String {
    notebook_text(nodes, &Theme::default(), width)
        .lines
        .iter()
        .map(line_to_plain)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn line_to_plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn push_node(node: &Node, theme: &Theme, width: u16, out: &mut Vec<Line<'static>>) {
    match node {
        Node::Placeholder { message } => {
            out.push(Line::from(Span::styled(message.clone(), theme.text_muted)));
        }
        Node::Cell { role, children, .. } => {
            for child in children {
                push_cell_child(*role, child, theme, width, out);
            }
        }
        other => push_cell_child(CellRole::Code, other, theme, width, out),
    }
}

fn push_cell_child(
    role: CellRole,
    node: &Node,
    theme: &Theme,
    width: u16,
    out: &mut Vec<Line<'static>>,
) {
    match node {
        Node::Header {
            label,
            number,
            execution_count,
        } => {
            let label_style = match role {
                CellRole::Code => theme.header_code,
                CellRole::Markdown => theme.header_markdown,
            };
            out.push(header_line(label, *number, *execution_count, label_style, theme, width));
        }
        Node::Code(code) => push_text_lines(&code.source, INDENT, theme.code, out),
        Node::Markdown(md) => push_text_lines(&md.source, INDENT, theme.text_primary, out),
        Node::Outputs { label, children } => {
            out.push(Line::from(Span::styled(format!("{label}:"), theme.output_label)));
            for child in children {
                push_output(child, theme, out);
            }
        }
        other => push_output(other, theme, out),
    }
}

fn push_output(node: &Node, theme: &Theme, out: &mut Vec<Line<'static>>) {
    match node {
        Node::Stream { name, text } => {
            let base = if name.as_deref() == Some("stderr") {
                theme.stderr
            } else {
                theme.text_primary
            };
            push_ansi_lines(text, base, out);
        }
        Node::Text { text } => push_text_lines(text, INDENT, theme.text_primary, out),
        Node::Html { markup } => push_text_lines(&html_to_text(markup), INDENT, theme.text_primary, out),
        Node::Image { mime, .. } => {
            out.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(format!("[{mime}]"), theme.media),
            ]));
        }
        Node::Error { text, .. } => push_ansi_lines(text, theme.danger, out),
        Node::Placeholder { message } => {
            out.push(Line::from(Span::styled(message.clone(), theme.text_muted)));
        }
        Node::Cell { .. } | Node::Header { .. } | Node::Code(_) | Node::Markdown(_) | Node::Outputs { .. } => {
            push_node(node, theme, 0, out);
        }
    }
}

fn header_line(
    label: &str,
    number: usize,
    execution_count: Option<u64>,
    label_style: Style,
    theme: &Theme,
    width: u16,
) -> Line<'static> {
    let mut spans = vec![
        Span::styled(label.to_string(), label_style),
        Span::styled(format!(" [{number}]"), theme.accent),
    ];
    if let Some(count) = execution_count {
        spans.push(Span::styled(format!(" In [{count}]"), theme.text_muted));
    }

    let used: usize = spans.iter().map(|s| UnicodeWidthStr::width(s.content.as_ref())).sum();
    let remaining = (width as usize).saturating_sub(used + 1);
    if remaining > 0 {
        spans.push(Span::styled(format!(" {}", RULE.repeat(remaining)), theme.text_muted));
    }
    Line::from(spans)
}

fn push_text_lines(text: &str, indent: &'static str, style: Style, out: &mut Vec<Line<'static>>) {
    let text = text.strip_suffix('\n').unwrap_or(text);
    for line in text.split('\n') {
        out.push(Line::from(vec![
            Span::raw(indent),
            Span::styled(line.replace('\t', "    "), style),
        ]));
    }
}

fn push_ansi_lines(text: &str, base: Style, out: &mut Vec<Line<'static>>) {
    let text = text.strip_suffix('\n').unwrap_or(text);
    for mut line in ansi_text(text).lines {
        for span in &mut line.spans {
            span.style = base.patch(span.style);
        }
        line.spans.insert(0, Span::raw(INDENT));
        out.push(line);
    }
}

/// Reduces HTML to readable text: tags dropped, block ends turned into line breaks.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::new();
    let mut tag = String::new();
    let mut in_tag = false;
    let mut in_pre = false;
    // Raw-text element whose content is not shown, until its closing tag.
    let mut hidden: Option<&'static str> = None;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag_name(&tag);
                if let Some(open) = hidden {
                    if name.strip_prefix('/') == Some(open) {
                        hidden = None;
                    }
                    continue;
                }
                if let Some(raw) = RAW_TEXT_TAGS.iter().find(|t| **t == name) {
                    if !tag.ends_with('/') {
                        hidden = Some(*raw);
                    }
                } else if breaks_line(name) {
                    out.push('\n');
                    if name == "/pre" {
                        in_pre = false;
                    }
                } else if name == "pre" {
                    in_pre = true;
                } else if name == "/td" || name == "/th" {
                    out.push(' ');
                }
            }
            _ if in_tag => tag.push(ch.to_ascii_lowercase()),
            _ if hidden.is_some() => {}
            '\n' | '\r' if !in_pre => out.push(' '),
            _ => out.push(ch),
        }
    }

    decode_basic_html_entities(&out)
        .lines()
        .map(normalize_whitespace)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

const RAW_TEXT_TAGS: [&str; 2] = ["style", "script"];

fn tag_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .trim_end_matches('/')
}

fn breaks_line(name: &str) -> bool {
    matches!(
        name,
        "br" | "/p" | "/div" | "/tr" | "/li" | "/pre" | "/table" | "/h1" | "/h2" | "/h3" | "/h4" | "/h5" | "/h6"
    )
}

fn decode_basic_html_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn normalize_whitespace(s: &str) -> String {
    let mut out = String::new();
    let mut last_was_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !last_was_ws {
                out.push(' ');
                last_was_ws = true;
            }
        } else {
            out.push(ch);
            last_was_ws = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbview_core::node::CodeBlock;
    use nbview_core::node::MarkdownBlock;

    fn code_cell() -> Node {
        Node::Cell {
            role: CellRole::Code,
            index: 0,
            children: vec![
                Node::Header {
                    label: "Code",
                    number: 1,
                    execution_count: Some(3),
                },
                Node::Code(CodeBlock {
                    language: "python".into(),
                    source: "print('x')".into(),
                    highlighted: Some("<span>print</span>".into()),
                }),
                Node::Outputs {
                    label: "Output".into(),
                    children: vec![
                        Node::Stream {
                            name: Some("stdout".into()),
                            text: "x\n".into(),
                        },
                        Node::Image {
                            mime: "image/png".into(),
                            src: "data:image/png;base64,Zm9v".into(),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn renders_cells_with_headers_and_outputs() {
        let md = Node::Cell {
            role: CellRole::Markdown,
            index: 1,
            children: vec![
                Node::Header {
                    label: "Markdown",
                    number: 2,
                    execution_count: None,
                },
                Node::Markdown(MarkdownBlock {
                    source: "# Hi\n".into(),
                    html: Some("<h1>Hi</h1>".into()),
                }),
            ],
        };
        let plain = notebook_plain(&[code_cell(), md], 0);
        assert_eq!(
            plain,
            [
                "Code [1] In [3]",
                "  print('x')",
                "Output:",
                "  x",
                "  [image/png]",
                "",
                "Markdown [2]",
                "  # Hi",
            ]
            .join("\n")
        );
    }

    #[test]
    fn header_rule_fills_width() {
        let text = notebook_text(&[code_cell()], &Theme::default(), 30);
        let header = line_to_plain(&text.lines[0]);
        assert_eq!(UnicodeWidthStr::width(header.as_str()), 30);
        assert!(header.ends_with(RULE));
    }

    #[test]
    fn errors_use_danger_style() {
        let theme = Theme::default();
        let nodes = [Node::Error {
            ename: Some("E".into()),
            evalue: Some("v".into()),
            text: "line1\nline2".into(),
        }];
        let text = notebook_text(&nodes, &theme, 0);
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[1].spans[1].style, theme.danger);
    }

    #[test]
    fn placeholder_is_a_single_line() {
        let nodes = [Node::Placeholder {
            message: "No cells found".into(),
        }];
        assert_eq!(notebook_plain(&nodes, 80), "No cells found");
    }

    #[test]
    fn html_reduces_to_text_lines() {
        let html = "<table><tr><th>a</th><th>b</th></tr><tr><td>1 &amp; 2</td><td>3</td></tr></table>";
        assert_eq!(html_to_text(html), "a b\n1 & 2 3");
        assert_eq!(html_to_text("<b>bold</b><br/>next"), "bold\nnext");
        assert_eq!(html_to_text("<p>one\ntwo</p><pre>a\nb</pre>"), "one two\na\nb");
    }

    #[test]
    fn html_drops_style_and_script_content() {
        let frame = concat!(
            "<div>\n<style scoped>\n    .dataframe tbody tr th:only-of-type {\n",
            "        vertical-align: middle;\n    }\n</style>\n",
            "<table border=\"1\" class=\"dataframe\">\n<thead>\n<tr><th></th><th>a</th></tr>\n</thead>\n",
            "<tbody>\n<tr><th>0</th><td>1</td></tr>\n</tbody>\n</table>\n</div>",
        );
        let text = html_to_text(frame);
        assert!(!text.contains("vertical-align"), "{text}");
        assert!(!text.contains(".dataframe"), "{text}");
        assert_eq!(text, "a\n0 1");

        let scripted = "<p>before</p><script type=\"text/javascript\">var x = 1 < 2;</script><p>after</p>";
        assert_eq!(html_to_text(scripted), "before\nafter");
    }
}
