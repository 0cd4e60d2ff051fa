//! Unit test skeleton generation.
//!
//! Produces a `unittest` module with one placeholder test per function
//! definition. The analyzed code is never executed; the output is text only.

use log::debug;

use crate::detect::{FunctionCollector, FunctionDescriptor};
use crate::parser::{ParseError, SyntaxTree};

/// Placeholder passed for every parameter.
const PLACEHOLDER_ARGUMENT: &str = "None";

const INDENT: &str = "    ";

/// Generates a test module for a single source unit.
#[derive(Debug, Clone)]
pub struct TestSkeletonGenerator {
    module_name: String,
}

impl TestSkeletonGenerator {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Parse `source` and render its test module.
    pub fn generate(&self, source: &str) -> Result<String, ParseError> {
        let tree = SyntaxTree::parse(source)?;
        Ok(self.generate_for_tree(&tree))
    }

    pub fn generate_for_tree(&self, tree: &SyntaxTree) -> String {
        let functions = FunctionCollector::new().collect(tree.root());
        debug!(
            "generating {} test(s) for module {}",
            functions.len(),
            self.module_name
        );
        render_test_module(&self.module_name, &functions)
    }
}

/// Render the test module text for `functions`, in the given order.
pub fn render_test_module(module_name: &str, functions: &[FunctionDescriptor]) -> String {
    let mut lines = vec![
        "import unittest".to_string(),
        format!("import {}", module_name),
        String::new(),
        format!("class {}(unittest.TestCase):", test_class_name(module_name)),
    ];

    if functions.is_empty() {
        lines.push(format!("{}pass", INDENT));
    }

    for function in functions {
        lines.extend(render_test_method(module_name, function));
    }

    lines.join("\n")
}

/// `Test` followed by the module name with only its first letter upper-cased.
pub fn test_class_name(module_name: &str) -> String {
    let mut chars = module_name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    format!("Test{}", capitalized)
}

fn render_test_method(module_name: &str, function: &FunctionDescriptor) -> Vec<String> {
    let arguments = vec![PLACEHOLDER_ARGUMENT; function.parameter_names.len()].join(", ");

    vec![
        format!("{}def test_{}(self):", INDENT, function.name),
        format!("{}{}# TODO: Add appropriate test cases", INDENT, INDENT),
        format!(
            "{}{}result = {}.{}({})",
            INDENT, INDENT, module_name, function.name, arguments
        ),
        format!("{}{}self.assertIsNotNone(result)", INDENT, INDENT),
    ]
}
