//! Analysis engine that runs every rule over one source unit.

use log::debug;

use crate::parser::{ParseError, SyntaxTree};

use super::{
    ComplexityVisitor, Issue, OptimizationVisitor, SmellVisitor, DEFAULT_COMPLEXITY_THRESHOLD,
    DEFAULT_MAX_LOOP_DEPTH,
};

/// Thresholds for the configurable rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleConfig {
    /// Functions with complexity above this are flagged.
    pub complexity_threshold: u32,
    /// For-loops nested deeper than this are flagged.
    pub max_loop_depth: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: DEFAULT_COMPLEXITY_THRESHOLD,
            max_loop_depth: DEFAULT_MAX_LOOP_DEPTH,
        }
    }
}

/// Runs the complexity, nesting and optimization rules over a tree.
///
/// The engine holds configuration only. Each call builds fresh visitor
/// state, so one engine can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisEngine {
    rules: RuleConfig,
}

impl AnalysisEngine {
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    /// Parse `source` and analyze it.
    ///
    /// Fails only when the source is not valid Python; no partial result is
    /// produced in that case.
    pub fn analyze(&self, source: &str) -> Result<Vec<Issue>, ParseError> {
        let tree = SyntaxTree::parse(source)?;
        Ok(self.analyze_tree(&tree))
    }

    /// Issues for an already parsed tree: complexity issues first, then
    /// nesting issues, then optimization issues, each group in source order.
    pub fn analyze_tree(&self, tree: &SyntaxTree) -> Vec<Issue> {
        let root = tree.root();

        let mut issues =
            ComplexityVisitor::new(self.rules.complexity_threshold).detect(root);
        debug!("complexity pass: {} issue(s)", issues.len());

        let nesting = SmellVisitor::new(self.rules.max_loop_depth).detect(root);
        debug!("nesting pass: {} issue(s)", nesting.len());
        issues.extend(nesting);

        let optimizations = OptimizationVisitor::new().detect(root);
        debug!("optimization pass: {} issue(s)", optimizations.len());
        issues.extend(optimizations);

        issues
    }
}
