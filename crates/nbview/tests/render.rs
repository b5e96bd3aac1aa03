use nbview::Pipeline;
use nbview::core::CapabilityError;
use nbview::core::CodeHighlighter;
use nbview::core::MarkdownRenderer;
use nbview::core::Node;
use nbview::core::Role;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .expect("repo root")
}

fn read_fixture(name: &str) -> Value {
    let text = fs::read_to_string(repo_root().join("docs/fixtures").join(name)).expect("read fixture");
    serde_json::from_str(&text).expect("fixture is JSON")
}

struct TagMarkdown;

impl MarkdownRenderer for TagMarkdown {
    fn render_markdown(&self, source: &str) -> Result<String, CapabilityError> {
        Ok(format!("<md>{source}</md>"))
    }
}

struct TagHighlighter;

impl CodeHighlighter for TagHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, CapabilityError> {
        Ok(format!("<hl lang={language}>{code}</hl>"))
    }
}

fn tagging_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::bare();
    pipeline.set_markdown(Some(Box::new(TagMarkdown)));
    pipeline.set_highlighter(Some(Arc::new(TagHighlighter)));
    pipeline
}

#[test]
fn two_cell_notebook_end_to_end() {
    let rendered = tagging_pipeline()
        .render_value(read_fixture("two_cells.ipynb"))
        .expect("valid notebook");
    assert_eq!(rendered.nodes.len(), 2);

    let markdown = &rendered.nodes[0];
    assert_eq!(markdown.role(), Role::Cell);
    match markdown.children() {
        [Node::Header { label, number, .. }, Node::Markdown(md)] => {
            assert_eq!(*label, "Markdown");
            assert_eq!(*number, 1);
            assert_eq!(md.html.as_deref(), Some("<md># Hi</md>"));
        }
        other => panic!("unexpected markdown cell: {other:?}"),
    }

    let code = &rendered.nodes[1];
    match code.children() {
        [Node::Header { label, number, execution_count }, Node::Code(block), Node::Outputs { label: out_label, children }] => {
            assert_eq!(*label, "Code");
            assert_eq!(*number, 2);
            assert_eq!(*execution_count, Some(1));
            assert_eq!(block.highlighted.as_deref(), Some("<hl lang=python>print('x')</hl>"));
            assert_eq!(out_label, "Output");
            assert_eq!(
                children,
                &vec![Node::Stream {
                    name: Some("stdout".into()),
                    text: "x\n".into(),
                }]
            );
        }
        other => panic!("unexpected code cell: {other:?}"),
    }
}

#[test]
fn malformed_output_is_skipped_and_sibling_kept() {
    let rendered = Pipeline::bare()
        .render_value(read_fixture("malformed_output.ipynb"))
        .expect("valid notebook");
    let cell = rendered.cells().next().expect("one cell");
    let outputs = cell.child(Role::Output).expect("output section");
    assert_eq!(
        outputs.children(),
        &[Node::Stream {
            name: Some("stdout".into()),
            text: "ok\n".into(),
        }]
    );
}

#[test]
fn rich_outputs_follow_mime_priority_and_skip_unknowns() {
    let rendered = tagging_pipeline()
        .render_value(read_fixture("rich_outputs.ipynb"))
        .expect("valid notebook");

    // The raw cell produces no node.
    assert_eq!(rendered.nodes.len(), 1);
    let cell = &rendered.nodes[0];

    match cell.child(Role::Code) {
        Some(Node::Code(block)) => assert_eq!(block.language, "r"),
        other => panic!("unexpected code node: {other:?}"),
    }

    let outputs = cell.child(Role::Output).expect("output section");
    let roles: Vec<Role> = outputs.children().iter().map(Node::role).collect();
    assert_eq!(roles, vec![Role::Image, Role::Html, Role::Stream, Role::Error]);

    match &outputs.children()[0] {
        Node::Image { mime, src } => {
            assert_eq!(mime, "image/png");
            assert_eq!(src, "data:image/png;base64,Zm9v");
        }
        other => panic!("expected image, got {other:?}"),
    }
    match &outputs.children()[1] {
        Node::Html { markup } => assert!(markup.starts_with("<table>\n<tr>")),
        other => panic!("expected html, got {other:?}"),
    }
    match &outputs.children()[3] {
        Node::Error { ename, text, .. } => {
            assert_eq!(ename.as_deref(), Some("ValueError"));
            assert_eq!(text, "line1\nline2");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn missing_cells_render_one_placeholder() {
    let rendered = Pipeline::bare()
        .render_value(read_fixture("empty.ipynb"))
        .expect("valid notebook");
    assert!(rendered.is_placeholder());
    assert_eq!(rendered.cells().count(), 0);
}
