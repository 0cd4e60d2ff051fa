//! Function signature collection for test scaffolding.

use crate::parser::{function_name, parameter_names, NodeKind, SyntaxNode};

use super::visitor::{run, Visitor};
use super::FunctionDescriptor;

/// Collects every function definition in pre-order, nested ones included.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCollector;

impl FunctionCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self, root: SyntaxNode<'_>) -> Vec<FunctionDescriptor> {
        run(self, root)
    }
}

impl<'t> Visitor<'t> for FunctionCollector {
    type State = Vec<FunctionDescriptor>;
    type Output = Vec<FunctionDescriptor>;

    fn enter(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        if node.kind() == NodeKind::FunctionDefinition {
            state.push(FunctionDescriptor {
                name: function_name(&node),
                line_number: node.line(),
                parameter_names: parameter_names(&node),
            });
        }
    }

    fn finish(&self, state: Self::State) -> Self::Output {
        state
    }
}
