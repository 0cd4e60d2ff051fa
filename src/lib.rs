//! Refactorcheck - a refactoring assistant for Python sources.
//!
//! Refactorcheck parses Python with tree-sitter and reports three kinds of
//! findings: functions with high cyclomatic complexity, for-loops nested
//! too deeply, and accumulation loops that can be rewritten as list
//! comprehensions. It can also scaffold a unittest module for the
//! functions defined in a file.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter front end and the syntax tree facade
//! - `detect`: visitors over the syntax tree and the analysis engine
//! - `testgen`: unittest skeleton generation
//! - `config`: YAML configuration schema
//! - `project`: parallel analysis of a directory of Python files
//! - `report`: output formatting (pretty, JSON, markdown)
//!
//! # Example
//!
//! ```
//! let source = "def f(items):\n    out = []\n    for x in items:\n        out.append(x * 2)\n    return out\n";
//! let issues = refactorcheck::analyze(source).unwrap();
//! assert_eq!(issues[0].optimized_code(), Some("[x * 2 for x in items]"));
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod parser;
pub mod project;
pub mod report;
pub mod testgen;

pub use config::Config;
pub use detect::{
    AnalysisEngine, ComplexityVisitor, FunctionCollector, FunctionDescriptor, Issue, IssueType,
    OptimizationVisitor, RuleConfig, SmellVisitor,
};
pub use parser::{ParseError, SyntaxTree};
pub use project::{FileAnalysis, ProjectAnalyzer, ProjectResults};
pub use testgen::TestSkeletonGenerator;

/// Analyze Python source with the default rules.
///
/// Issues come back grouped by kind: complexity, then loop nesting, then
/// comprehension opportunities.
pub fn analyze(source: &str) -> Result<Vec<Issue>, ParseError> {
    AnalysisEngine::default().analyze(source)
}

/// Render a unittest skeleton for every function defined in `source`.
pub fn generate_tests(source: &str, module_name: &str) -> Result<String, ParseError> {
    TestSkeletonGenerator::new(module_name).generate(source)
}
