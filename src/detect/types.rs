//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Kinds of findings the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "high_complexity")]
    HighComplexity,
    #[serde(rename = "nested_loops")]
    NestedLoops,
    #[serde(rename = "list_comprehension")]
    ListComprehensionOpportunity,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::HighComplexity => "high_complexity",
            IssueType::NestedLoops => "nested_loops",
            IssueType::ListComprehensionOpportunity => "list_comprehension",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high_complexity" => Some(IssueType::HighComplexity),
            "nested_loops" => Some(IssueType::NestedLoops),
            "list_comprehension" => Some(IssueType::ListComprehensionOpportunity),
            _ => None,
        }
    }

    /// Fixed advice attached to every issue of this type.
    pub fn suggestion(&self) -> &'static str {
        match self {
            IssueType::HighComplexity => {
                "Consider breaking down this function into smaller, more focused functions"
            }
            IssueType::NestedLoops => "Consider restructuring the code to reduce nesting depth",
            IssueType::ListComprehensionOpportunity => {
                "Use a list comprehension for better readability and performance"
            }
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single finding.
///
/// Issues are only built through the per-type constructors, which keep
/// `optimized_code` present exactly for comprehension opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Issue {
    line_number: usize,
    issue_type: IssueType,
    description: String,
    suggestion: String,
    original_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimized_code: Option<String>,
}

impl Issue {
    pub fn high_complexity(
        line_number: usize,
        function_name: &str,
        complexity: u32,
        original_code: String,
    ) -> Self {
        Self::new(
            line_number,
            IssueType::HighComplexity,
            format!(
                "Function '{}' has high cyclomatic complexity ({})",
                function_name, complexity
            ),
            original_code,
            None,
        )
    }

    pub fn nested_loops(line_number: usize, depth: usize, original_code: String) -> Self {
        Self::new(
            line_number,
            IssueType::NestedLoops,
            format!("Deeply nested loops detected (depth {})", depth),
            original_code,
            None,
        )
    }

    pub fn list_comprehension(
        line_number: usize,
        original_code: String,
        optimized_code: String,
    ) -> Self {
        Self::new(
            line_number,
            IssueType::ListComprehensionOpportunity,
            "Loop could be replaced with list comprehension".to_string(),
            original_code,
            Some(optimized_code),
        )
    }

    fn new(
        line_number: usize,
        issue_type: IssueType,
        description: String,
        original_code: String,
        optimized_code: Option<String>,
    ) -> Self {
        Self {
            line_number,
            issue_type,
            description,
            suggestion: issue_type.suggestion().to_string(),
            original_code,
            optimized_code,
        }
    }

    /// Line where the offending construct starts (1-indexed).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    /// Verbatim source of the offending construct.
    pub fn original_code(&self) -> &str {
        &self.original_code
    }

    /// Replacement text; only set for comprehension opportunities.
    pub fn optimized_code(&self) -> Option<&str> {
        self.optimized_code.as_deref()
    }
}

/// A function definition found in the tree, as needed for test scaffolding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Line of the `def` keyword (1-indexed).
    pub line_number: usize,
    pub parameter_names: Vec<String>,
}
