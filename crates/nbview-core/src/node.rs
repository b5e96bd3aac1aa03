//! Renderer-agnostic presentation tree.
//!
//! Nodes carry content and a semantic [`Role`]; display surfaces decide how each role looks.

/// Semantic tag of a [`Node`], used by surfaces for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Placeholder,
    Cell,
    Header,
    Code,
    Markdown,
    Output,
    Stream,
    Text,
    Html,
    Image,
    Error,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Cell => "cell",
            Self::Header => "header",
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Output => "output",
            Self::Stream => "stream",
            Self::Text => "text",
            Self::Html => "html",
            Self::Image => "image",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRole {
    Code,
    Markdown,
}

impl CellRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Markdown => "Markdown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub source: String,
    /// Highlighter markup; `None` when highlighting was skipped or failed.
    pub highlighted: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownBlock {
    pub source: String,
    /// Rendered HTML; `None` means show `source` literally.
    pub html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Shown instead of cells when the notebook has none.
    Placeholder { message: String },
    /// Root node of one rendered cell.
    Cell {
        role: CellRole,
        index: usize,
        children: Vec<Node>,
    },
    Header {
        label: &'static str,
        /// 1-based display number.
        number: usize,
        execution_count: Option<u64>,
    },
    Code(CodeBlock),
    Markdown(MarkdownBlock),
    /// The output section of a code cell, under a single sub-header.
    Outputs { label: String, children: Vec<Node> },
    Stream { name: Option<String>, text: String },
    /// Preformatted `text/plain` result.
    Text { text: String },
    /// Trusted `text/html` markup, injected as-is.
    Html { markup: String },
    Image { mime: String, src: String },
    Error {
        ename: Option<String>,
        evalue: Option<String>,
        text: String,
    },
}

impl Node {
    pub fn role(&self) -> Role {
        match self {
            Self::Placeholder { .. } => Role::Placeholder,
            Self::Cell { .. } => Role::Cell,
            Self::Header { .. } => Role::Header,
            Self::Code(_) => Role::Code,
            Self::Markdown(_) => Role::Markdown,
            Self::Outputs { .. } => Role::Output,
            Self::Stream { .. } => Role::Stream,
            Self::Text { .. } => Role::Text,
            Self::Html { .. } => Role::Html,
            Self::Image { .. } => Role::Image,
            Self::Error { .. } => Role::Error,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Cell { children, .. } | Self::Outputs { children, .. } => children,
            _ => &[],
        }
    }

    /// Finds the first direct child with `role`.
    pub fn child(&self, role: Role) -> Option<&Node> {
        self.children().iter().find(|n| n.role() == role)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_and_children() {
        let cell = Node::Cell {
            role: CellRole::Code,
            index: 0,
            children: vec![
                Node::Header {
                    label: CellRole::Code.label(),
                    number: 1,
                    execution_count: None,
                },
                Node::Outputs {
                    label: "Output".into(),
                    children: vec![Node::Text { text: "1".into() }],
                },
            ],
        };

        assert_eq!(cell.role(), Role::Cell);
        assert_eq!(cell.children().len(), 2);
        assert_eq!(cell.count(), 4);
        let outputs = cell.child(Role::Output).unwrap();
        assert_eq!(outputs.children()[0].role().as_str(), "text");
        assert!(cell.child(Role::Markdown).is_none());
    }
}
