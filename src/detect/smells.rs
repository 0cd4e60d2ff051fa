//! Detection of deeply nested for-loops.
//!
//! Only for-loops contribute to the depth. Every loop found deeper than the
//! allowed depth is reported on its own, so a chain of N nested loops with
//! the default limit of 2 produces N - 2 issues.

use crate::parser::{NodeKind, SyntaxNode};

use super::visitor::{run, Visitor};
use super::Issue;

/// For-loops nested deeper than this are reported.
pub const DEFAULT_MAX_LOOP_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct SmellVisitor {
    max_depth: usize,
}

impl Default for SmellVisitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOOP_DEPTH)
    }
}

#[derive(Debug, Default)]
pub struct SmellState {
    depth: usize,
    issues: Vec<Issue>,
}

impl SmellVisitor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `NestedLoops` issues in source order.
    pub fn detect(&self, root: SyntaxNode<'_>) -> Vec<Issue> {
        run(self, root)
    }
}

impl<'t> Visitor<'t> for SmellVisitor {
    type State = SmellState;
    type Output = Vec<Issue>;

    fn enter(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        match node.kind() {
            NodeKind::For => {
                state.depth += 1;
                if state.depth > self.max_depth {
                    state.issues.push(Issue::nested_loops(
                        node.line(),
                        state.depth,
                        node.reconstruct_text(),
                    ));
                }
            }
            NodeKind::Module
            | NodeKind::FunctionDefinition
            | NodeKind::If
            | NodeKind::Elif
            | NodeKind::While
            | NodeKind::Block
            | NodeKind::ExpressionStatement
            | NodeKind::Call
            | NodeKind::Attribute
            | NodeKind::Comment
            | NodeKind::Other => {}
        }
    }

    fn leave(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        if node.kind() == NodeKind::For {
            state.depth = state.depth.saturating_sub(1);
        }
    }

    fn finish(&self, state: Self::State) -> Self::Output {
        state.issues
    }
}
