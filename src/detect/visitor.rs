//! Visitor seam shared by every rule.
//!
//! A visitor holds only its configuration. Mutable traversal state lives in
//! an explicit `State` value that `run` creates, threads through every
//! enter/leave callback, and hands back to `finish`. Running the same
//! visitor twice, or over two subtrees at once, never shares state.

use crate::parser::{SyntaxNode, WalkEvent};

pub trait Visitor<'t> {
    /// Scoped state for a single traversal.
    type State: Default;
    /// What the traversal produces.
    type Output;

    /// Called when `node` is reached, before its children.
    fn enter(&self, state: &mut Self::State, node: SyntaxNode<'t>);

    /// Called after all of `node`'s children have been visited.
    fn leave(&self, _state: &mut Self::State, _node: SyntaxNode<'t>) {}

    /// Turn the final state into the visitor's result.
    fn finish(&self, state: Self::State) -> Self::Output;
}

/// Walk `root` depth-first with a fresh state and return the visitor's output.
pub fn run<'t, V: Visitor<'t>>(visitor: &V, root: SyntaxNode<'t>) -> V::Output {
    let mut state = V::State::default();
    for event in root.walk() {
        match event {
            WalkEvent::Enter(node) => visitor.enter(&mut state, node),
            WalkEvent::Leave(node) => visitor.leave(&mut state, node),
        }
    }
    visitor.finish(state)
}
