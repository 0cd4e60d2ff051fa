//! Accumulate-loop detection and comprehension synthesis.
//!
//! Matches the narrow shape
//!
//! ```text
//! for <target> in <iterable>:
//!     <collection>.append(<element>)
//! ```
//!
//! and proposes `[<element> for <target> in <iterable>]`. The rewrite is
//! purely syntactic. It does not check that the accumulator starts empty or
//! is unused elsewhere.

use crate::parser::{is_async, NodeKind, SyntaxNode};

use super::visitor::{run, Visitor};
use super::Issue;

/// Method name that marks an accumulate call.
const ACCUMULATE_METHOD: &str = "append";

/// Grammar kinds that need parentheses when used as a comprehension iterable.
const BARE_ITERABLE_KINDS: &[&str] = &["expression_list", "conditional_expression", "lambda"];

/// The pieces of a matched accumulate loop.
#[derive(Debug, Clone, Copy)]
pub struct AccumulateLoop<'t> {
    pub target: SyntaxNode<'t>,
    pub iterable: SyntaxNode<'t>,
    /// The single argument handed to `append`.
    pub element: SyntaxNode<'t>,
}

/// Match a for-loop whose body is exactly one `<x>.append(<element>)` call.
pub fn match_accumulate_loop<'t>(node: SyntaxNode<'t>) -> Option<AccumulateLoop<'t>> {
    if node.kind() != NodeKind::For || is_async(&node) {
        return None;
    }

    let statements = node.statements();
    let [statement] = statements.as_slice() else {
        return None;
    };
    if statement.kind() != NodeKind::ExpressionStatement {
        return None;
    }

    let expressions = statement.named_children();
    let [call] = expressions.as_slice() else {
        return None;
    };
    if call.kind() != NodeKind::Call {
        return None;
    }

    let function = call.field("function")?;
    if function.kind() != NodeKind::Attribute
        || function.field("attribute")?.text() != ACCUMULATE_METHOD
    {
        return None;
    }

    let element = single_argument(call.field("arguments")?)?;

    Some(AccumulateLoop {
        target: node.field("left")?,
        iterable: node.field("right")?,
        element,
    })
}

/// The only positional argument of a call, if there is exactly one.
fn single_argument(arguments: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    // `xs.append(x for x in y)` has a generator expression in place of the list.
    if arguments.grammar_kind() == "generator_expression" {
        return Some(arguments);
    }

    let args = arguments.named_children();
    match args.as_slice() {
        [arg]
            if !matches!(
                arg.grammar_kind(),
                "keyword_argument" | "list_splat" | "dictionary_splat"
            ) =>
        {
            Some(*arg)
        }
        _ => None,
    }
}

/// Build the list comprehension text from already reconstructed pieces.
pub fn synthesize_comprehension(element: &str, target: &str, iterable: &str) -> String {
    format!("[{} for {} in {}]", element, target, iterable)
}

/// Iterable text, parenthesised where the bare form would change meaning
/// inside a comprehension clause.
fn iterable_text(iterable: &SyntaxNode<'_>) -> String {
    let text = iterable.text();
    if BARE_ITERABLE_KINDS.contains(&iterable.grammar_kind()) {
        format!("({})", text)
    } else {
        text.to_string()
    }
}

/// Proposes comprehension rewrites for accumulate loops.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizationVisitor;

impl OptimizationVisitor {
    pub fn new() -> Self {
        Self
    }

    /// `ListComprehensionOpportunity` issues in source order.
    pub fn detect(&self, root: SyntaxNode<'_>) -> Vec<Issue> {
        run(self, root)
    }
}

impl<'t> Visitor<'t> for OptimizationVisitor {
    type State = Vec<Issue>;
    type Output = Vec<Issue>;

    fn enter(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        match node.kind() {
            NodeKind::For => {
                if let Some(found) = match_accumulate_loop(node) {
                    let optimized = synthesize_comprehension(
                        found.element.text(),
                        found.target.text(),
                        &iterable_text(&found.iterable),
                    );
                    state.push(Issue::list_comprehension(
                        node.line(),
                        node.reconstruct_text(),
                        optimized,
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

    fn finish(&self, state: Self::State) -> Self::Output {
        state
    }
}
