//! Python front end: turns source text into a read-only syntax tree.
//!
//! This module provides:
//! - `SyntaxTree`: a tree-sitter parse tree that owns its source text
//! - `SyntaxNode`: a node handle classified into the closed `NodeKind` union
//! - `Walk`: an iterative enter/leave traversal over any subtree
//! - `ParseError`: the only way parsing can fail
//!
//! Rules never touch tree-sitter directly. They match on `NodeKind` and ask
//! nodes for fields, statements and reconstructed text.

mod python;
mod walk;

pub use python::{function_name, is_async, parameter_names, LANGUAGE_NAME};
pub use walk::{Walk, WalkEvent};

use std::fmt;

use thiserror::Error;

/// Source text is not valid Python.
///
/// `line` and `column` are 1-indexed and point at the first offending node
/// of the tree; `column` counts characters. Both are 0 when the grammar
/// could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Node kinds the rules care about.
///
/// Everything else collapses into `Other`, so every visitor can match
/// exhaustively without a wildcard arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    FunctionDefinition,
    If,
    Elif,
    While,
    For,
    Block,
    ExpressionStatement,
    Call,
    Attribute,
    Comment,
    Other,
}

impl NodeKind {
    /// Whether this construct adds a decision path to the enclosing function.
    pub fn is_decision_point(&self) -> bool {
        matches!(
            self,
            NodeKind::If | NodeKind::Elif | NodeKind::While | NodeKind::For
        )
    }
}

/// A parsed source unit.
pub struct SyntaxTree {
    tree: tree_sitter::Tree,
    source: String,
}

impl SyntaxTree {
    /// Parse Python source. Trees containing ERROR or MISSING nodes, or
    /// Python 2 only statements, are rejected as a whole; no partial tree
    /// is returned.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let tree = python::parse(source)?;

        let root = SyntaxNode::new(tree.root_node(), source.as_bytes());
        if let Some(err) = first_error(root) {
            return Err(err);
        }

        Ok(Self {
            tree,
            source: source.to_string(),
        })
    }

    /// The source text the tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The module node.
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.tree.root_node(), self.source.as_bytes())
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root())
            .field("source_len", &self.source.len())
            .finish()
    }
}

/// Locate the first syntax error in pre-order.
///
/// The grammar still accepts Python 2 `print` and `exec` statements without
/// error nodes, so those are reported here as well.
fn first_error(root: SyntaxNode<'_>) -> Option<ParseError> {
    for event in root.walk() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };
        let inner = node.inner();
        if inner.is_missing() {
            return Some(ParseError::new(
                format!("missing {:?}", inner.kind()),
                node.line(),
                node.column(),
            ));
        }
        if inner.is_error() {
            return Some(ParseError::new("invalid syntax", node.line(), node.column()));
        }
        if let Some(keyword) = python::legacy_statement_keyword(&node) {
            return Some(ParseError::new(
                format!("Missing parentheses in call to '{}'", keyword),
                node.line(),
                node.column(),
            ));
        }
    }

    if root.inner().has_error() {
        return Some(ParseError::new("invalid syntax", root.line(), root.column()));
    }
    None
}

/// A node of a `SyntaxTree`, paired with the source it spans.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t [u8],
}

impl<'t> SyntaxNode<'t> {
    pub(crate) fn new(node: tree_sitter::Node<'t>, source: &'t [u8]) -> Self {
        Self { node, source }
    }

    pub(crate) fn inner(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        python::classify(self.node)
    }

    /// The grammar's own name for this node (e.g. "pattern_list").
    pub fn grammar_kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Start line (1-indexed).
    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// Start column (1-indexed), counted in characters rather than bytes.
    pub fn column(&self) -> usize {
        let start = self.node.start_byte();
        let byte_column = self.node.start_position().column;
        let line_prefix = start
            .checked_sub(byte_column)
            .and_then(|line_start| self.source.get(line_start..start))
            .and_then(|bytes| std::str::from_utf8(bytes).ok());

        match line_prefix {
            Some(prefix) => prefix.chars().count() + 1,
            None => byte_column + 1,
        }
    }

    /// End line (1-indexed).
    pub fn end_line(&self) -> usize {
        self.node.end_position().row + 1
    }

    /// Child stored under a grammar field such as "body" or "left".
    pub fn field(&self, name: &str) -> Option<SyntaxNode<'t>> {
        self.node
            .child_by_field_name(name)
            .map(|child| SyntaxNode::new(child, self.source))
    }

    /// Named children, with comments filtered out.
    pub fn named_children(&self) -> Vec<SyntaxNode<'t>> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| SyntaxNode::new(child, self.source))
            .collect()
    }

    /// Statements of a block, or the block under this node's "body" field.
    pub fn statements(&self) -> Vec<SyntaxNode<'t>> {
        match self.kind() {
            NodeKind::Block => self.named_children(),
            _ => self
                .field("body")
                .map(|body| body.named_children())
                .unwrap_or_default(),
        }
    }

    /// Verbatim source text of the node.
    ///
    /// Returns "" when the node's byte span does not resolve to valid UTF-8
    /// inside the source.
    pub fn text(&self) -> &'t str {
        self.source
            .get(self.node.start_byte()..self.node.end_byte())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    /// Owned copy of `text()`, used for issue snippets.
    pub fn reconstruct_text(&self) -> String {
        self.text().to_string()
    }

    /// Enter/leave traversal of this subtree, starting with this node.
    pub fn walk(&self) -> Walk<'t> {
        Walk::new(*self)
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}",
            self.node.kind(),
            self.line(),
            self.column()
        )
    }
}
