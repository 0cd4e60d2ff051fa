//! Detection rules for refactoring opportunities in Python code.

mod complexity;
mod engine;
mod functions;
mod optimization;
mod smells;
mod types;
mod visitor;

pub use complexity::{ComplexityVisitor, FunctionComplexity, DEFAULT_COMPLEXITY_THRESHOLD};
pub use engine::{AnalysisEngine, RuleConfig};
pub use functions::FunctionCollector;
pub use optimization::{
    match_accumulate_loop, synthesize_comprehension, AccumulateLoop, OptimizationVisitor,
};
pub use smells::{SmellVisitor, DEFAULT_MAX_LOOP_DEPTH};
pub use types::{FunctionDescriptor, Issue, IssueType};
pub use visitor::{run, Visitor};
