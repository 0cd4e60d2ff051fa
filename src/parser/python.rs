//! Python grammar binding and node classification.

use tree_sitter::{Language, Node, Parser, Tree};

use super::{NodeKind, ParseError, SyntaxNode};

/// Language identifier used in reports.
pub const LANGUAGE_NAME: &str = "python";

/// Run the tree-sitter Python grammar over `source`.
///
/// A fresh parser is created per call: `tree_sitter::Parser` is not `Sync`.
pub(super) fn parse(source: &str) -> Result<Tree, ParseError> {
    let language: Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ParseError::new(format!("failed to load python grammar: {}", e), 0, 0))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new("parser did not produce a tree", 0, 0))
}

pub(super) fn classify(node: Node) -> NodeKind {
    if !node.is_named() {
        return NodeKind::Other;
    }
    match node.kind() {
        "module" => NodeKind::Module,
        "function_definition" => NodeKind::FunctionDefinition,
        "if_statement" => NodeKind::If,
        "elif_clause" => NodeKind::Elif,
        "while_statement" => NodeKind::While,
        "for_statement" => NodeKind::For,
        "block" => NodeKind::Block,
        "expression_statement" => NodeKind::ExpressionStatement,
        "call" => NodeKind::Call,
        "attribute" => NodeKind::Attribute,
        "comment" => NodeKind::Comment,
        _ => NodeKind::Other,
    }
}

/// Keyword of a statement that only parses as Python 2 (`print "x"`,
/// `exec "code"`). Calls such as `print(x)` are ordinary call nodes.
pub(super) fn legacy_statement_keyword(node: &SyntaxNode<'_>) -> Option<&'static str> {
    match node.grammar_kind() {
        "print_statement" => Some("print"),
        "exec_statement" => Some("exec"),
        _ => None,
    }
}

/// Name of a function definition, or "" for any other node.
pub fn function_name(node: &SyntaxNode<'_>) -> String {
    node.field("name")
        .map(|name| name.text().to_string())
        .unwrap_or_default()
}

/// Whether a function definition or for-loop carries the `async` keyword.
pub fn is_async(node: &SyntaxNode<'_>) -> bool {
    node.inner()
        .child(0)
        .map(|first| first.kind() == "async")
        .unwrap_or(false)
}

/// Parameters of a function definition that can be bound positionally.
///
/// Collection stops at a bare `*` or `*args`: everything after it is
/// keyword-only. `**kwargs` and the `/` marker are skipped.
pub fn parameter_names(function: &SyntaxNode<'_>) -> Vec<String> {
    let Some(parameters) = function.field("parameters") else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for param in parameters.named_children() {
        match param.grammar_kind() {
            "identifier" => names.push(param.text().to_string()),
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.field("name") {
                    names.push(name.text().to_string());
                }
            }
            "typed_parameter" => match param.named_children().first() {
                Some(inner) if inner.grammar_kind() == "identifier" => {
                    names.push(inner.text().to_string())
                }
                Some(inner) if inner.grammar_kind() == "list_splat_pattern" => break,
                _ => {}
            },
            "list_splat_pattern" | "keyword_separator" => break,
            _ => {}
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxTree;

    fn first_function(tree: &SyntaxTree) -> SyntaxNode<'_> {
        tree.root()
            .walk()
            .find_map(|event| match event {
                crate::parser::WalkEvent::Enter(node)
                    if node.kind() == NodeKind::FunctionDefinition =>
                {
                    Some(node)
                }
                _ => None,
            })
            .expect("source should contain a function")
    }

    #[test]
    fn test_plain_parameters() {
        let tree = SyntaxTree::parse("def add(x, y):\n    return x + y\n").unwrap();
        let func = first_function(&tree);
        assert_eq!(function_name(&func), "add");
        assert_eq!(parameter_names(&func), vec!["x", "y"]);
    }

    #[test]
    fn test_no_parameters() {
        let tree = SyntaxTree::parse("def noop():\n    pass\n").unwrap();
        assert!(parameter_names(&first_function(&tree)).is_empty());
    }

    #[test]
    fn test_defaults_and_annotations() {
        let source = "def f(a: int, b=2, c: str = 'x'):\n    pass\n";
        let tree = SyntaxTree::parse(source).unwrap();
        assert_eq!(parameter_names(&first_function(&tree)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_variadic_and_keyword_only_are_skipped() {
        let source = "def f(a, /, b, *args, key=None, **kwargs):\n    pass\n";
        let tree = SyntaxTree::parse(source).unwrap();
        assert_eq!(parameter_names(&first_function(&tree)), vec!["a", "b"]);

        let source = "def g(a, *, key):\n    pass\n";
        let tree = SyntaxTree::parse(source).unwrap();
        assert_eq!(parameter_names(&first_function(&tree)), vec!["a"]);
    }

    #[test]
    fn test_async_detection() {
        let tree = SyntaxTree::parse("async def fetch(url):\n    pass\n").unwrap();
        let func = first_function(&tree);
        assert!(is_async(&func));
        assert_eq!(function_name(&func), "fetch");

        let tree = SyntaxTree::parse("def sync():\n    pass\n").unwrap();
        assert!(!is_async(&first_function(&tree)));
    }

    #[test]
    fn test_classify_ignores_anonymous_tokens() {
        let tree = SyntaxTree::parse("if x:\n    pass\n").unwrap();
        let if_node = tree.root().named_children()[0];
        assert_eq!(if_node.kind(), NodeKind::If);

        let keyword = if_node.inner().child(0).unwrap();
        assert_eq!(keyword.kind(), "if");
        assert_eq!(classify(keyword), NodeKind::Other);
    }
}
