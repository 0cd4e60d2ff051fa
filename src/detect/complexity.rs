//! Cyclomatic complexity per function.
//!
//! Cyclomatic complexity is calculated as:
//! - Start at 1 on entering a function definition
//! - Add 1 for each: if, elif, while, for
//!
//! Nested function definitions open their own scope. Their branches never
//! count toward the enclosing function, and the enclosing count resumes
//! where it left off once the inner definition ends.

use crate::parser::{function_name, NodeKind, SyntaxNode};

use super::visitor::{run, Visitor};
use super::Issue;

/// Functions with complexity strictly above this are flagged.
pub const DEFAULT_COMPLEXITY_THRESHOLD: u32 = 10;

/// Complexity information for a function.
#[derive(Debug, Clone)]
pub struct FunctionComplexity<'t> {
    /// The function definition node; its position identifies the function.
    pub node: SyntaxNode<'t>,
    pub name: String,
    pub line: usize,
    pub complexity: u32,
}

/// Computes complexity for every function definition in a tree.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityVisitor {
    threshold: u32,
}

impl Default for ComplexityVisitor {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLEXITY_THRESHOLD)
    }
}

/// An open function scope: where its result goes and its running count.
#[derive(Debug)]
struct Scope {
    index: usize,
    count: u32,
}

#[derive(Debug, Default)]
pub struct ComplexityState<'t> {
    functions: Vec<FunctionComplexity<'t>>,
    scopes: Vec<Scope>,
}

impl ComplexityVisitor {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Complexity of every function under `root`, in definition order
    /// (pre-order), nested definitions included.
    pub fn compute<'t>(&self, root: SyntaxNode<'t>) -> Vec<FunctionComplexity<'t>> {
        run(self, root)
    }

    /// One `HighComplexity` issue per function above the threshold.
    pub fn detect(&self, root: SyntaxNode<'_>) -> Vec<Issue> {
        self.compute(root)
            .into_iter()
            .filter(|f| f.complexity > self.threshold)
            .map(|f| {
                Issue::high_complexity(f.line, &f.name, f.complexity, f.node.reconstruct_text())
            })
            .collect()
    }
}

impl<'t> Visitor<'t> for ComplexityVisitor {
    type State = ComplexityState<'t>;
    type Output = Vec<FunctionComplexity<'t>>;

    fn enter(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        match node.kind() {
            NodeKind::FunctionDefinition => {
                let index = state.functions.len();
                state.functions.push(FunctionComplexity {
                    node,
                    name: function_name(&node),
                    line: node.line(),
                    complexity: 1,
                });
                state.scopes.push(Scope { index, count: 1 });
            }
            NodeKind::If | NodeKind::Elif | NodeKind::While | NodeKind::For => {
                // Module-level branches belong to no function.
                if let Some(scope) = state.scopes.last_mut() {
                    scope.count += 1;
                }
            }
            NodeKind::Module
            | NodeKind::Block
            | NodeKind::ExpressionStatement
            | NodeKind::Call
            | NodeKind::Attribute
            | NodeKind::Comment
            | NodeKind::Other => {}
        }
    }

    fn leave(&self, state: &mut Self::State, node: SyntaxNode<'t>) {
        if node.kind() != NodeKind::FunctionDefinition {
            return;
        }
        if let Some(scope) = state.scopes.pop() {
            state.functions[scope.index].complexity = scope.count;
        }
    }

    fn finish(&self, state: Self::State) -> Self::Output {
        state.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::IssueType;
    use crate::parser::SyntaxTree;
    use indoc::indoc;

    fn complexities(source: &str) -> Vec<(String, u32)> {
        let tree = SyntaxTree::parse(source).unwrap();
        ComplexityVisitor::default()
            .compute(tree.root())
            .into_iter()
            .map(|f| (f.name, f.complexity))
            .collect()
    }

    #[test]
    fn test_simple_function_has_base_complexity() {
        let found = complexities("def simple_function():\n    return 1\n");
        assert_eq!(found, vec![("simple_function".to_string(), 1)]);
    }

    #[test]
    fn test_single_if() {
        let found = complexities(indoc! {"
            def check(x):
                if x:
                    return 1
                return 0
        "});
        assert_eq!(found[0].1, 2);
    }

    #[test]
    fn test_elif_chain_counts_each_branch() {
        let found = complexities(indoc! {r#"
            def classify(x):
                if x < 0:
                    return "negative"
                elif x == 0:
                    return "zero"
                elif x < 10:
                    return "small"
                else:
                    return "large"
        "#});
        // 1 (base) + 1 (if) + 2 (elif)
        assert_eq!(found[0].1, 4);
    }

    #[test]
    fn test_loops_count() {
        let found = complexities(indoc! {"
            def process(items):
                for item in items:
                    while item:
                        item -= 1
                return items
        "});
        assert_eq!(found[0].1, 3);
    }

    #[test]
    fn test_non_branching_constructs_do_not_count() {
        let found = complexities(indoc! {"
            def tidy(xs):
                ys = [x for x in xs if x]
                z = 1 if ys else 2
                try:
                    return ys and z
                except ValueError:
                    return None
        "});
        assert_eq!(found[0].1, 1);
    }

    #[test]
    fn test_nested_function_is_independent() {
        let found = complexities(indoc! {"
            def outer(x):
                if x:
                    pass
                def inner(y):
                    if y:
                        pass
                    for i in y:
                        pass
                    while y:
                        pass
                    return y
                if x > 1:
                    pass
                return inner
        "});
        // Pre-order: the outer function is listed before the inner one.
        assert_eq!(
            found,
            vec![("outer".to_string(), 3), ("inner".to_string(), 4)]
        );
    }

    #[test]
    fn test_methods_and_module_level_branches() {
        let found = complexities(indoc! {"
            if DEBUG:
                pass

            class Service:
                def start(self):
                    if self.ready:
                        return True
                    return False
        "});
        assert_eq!(found, vec![("start".to_string(), 2)]);
    }

    #[test]
    fn test_detect_uses_strict_threshold() {
        let source = indoc! {"
            def branchy(x):
                if x == 1:
                    return 1
                elif x == 2:
                    return 2
                elif x == 3:
                    return 3
                elif x == 4:
                    return 4
                elif x == 5:
                    return 5
                elif x == 6:
                    return 6
                elif x == 7:
                    return 7
                elif x == 8:
                    return 8
                elif x == 9:
                    return 9
                return 0
        "};
        let tree = SyntaxTree::parse(source).unwrap();

        // 1 + 9 branches = 10: not above the default threshold.
        assert!(ComplexityVisitor::default().detect(tree.root()).is_empty());

        let issues = ComplexityVisitor::new(9).detect(tree.root());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type(), IssueType::HighComplexity);
        assert_eq!(issues[0].line_number(), 1);
        assert!(issues[0].description().contains("'branchy'"));
        assert!(issues[0].description().contains("(10)"));
        assert!(issues[0].original_code().starts_with("def branchy(x):"));
        assert!(issues[0].original_code().contains("return 0"));
    }
}
