//! Output formatting for analysis results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - Markdown: a report document suitable for committing or sharing

use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::detect::{Issue, IssueType};
use crate::project::{total_issues, FileAnalysis, ProjectResults};

// =============================================================================
// Markdown Format
// =============================================================================

/// Render results as a markdown report. Files appear in sorted path order.
pub fn render_markdown(results: &ProjectResults) -> String {
    let mut lines: Vec<String> = vec!["# Code Analysis Report\n".to_string()];

    lines.push(format!("Total files analyzed: {}", results.len()));
    lines.push(format!("Total issues found: {}\n", total_issues(results)));

    for (path, analysis) in results {
        lines.push(format!("## {}", path));

        if let Some(ref error) = analysis.error {
            lines.push(format!("\n⚠️ Error: {}\n", error));
            continue;
        }

        if analysis.issues.is_empty() {
            lines.push("\n✅ No issues found\n".to_string());
            continue;
        }

        for issue in &analysis.issues {
            push_markdown_issue(&mut lines, issue);
        }
    }

    lines.join("\n")
}

fn push_markdown_issue(lines: &mut Vec<String>, issue: &Issue) {
    lines.push(format!(
        "\n### Line {}: {}",
        issue.line_number(),
        issue.issue_type()
    ));
    lines.push(format!("**Description:** {}", issue.description()));
    lines.push(format!("**Suggestion:** {}", issue.suggestion()));
    lines.push("\n**Original Code:**".to_string());
    lines.push(format!("```python\n{}\n```", issue.original_code()));

    if let Some(optimized) = issue.optimized_code() {
        lines.push("\n**Optimized Code:**".to_string());
        lines.push(format!("```python\n{}\n```", optimized));
    }
}

/// Write the markdown report to `output`, or to stdout when absent.
pub fn write_markdown(results: &ProjectResults, output: Option<&Path>) -> anyhow::Result<()> {
    let report = render_markdown(results);
    emit(&report, output)
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    pub files_analyzed: usize,
    pub total_issues: usize,
    pub files_failed: usize,
    pub files: Vec<&'a FileAnalysis>,
}

impl<'a> JsonReport<'a> {
    pub fn new(path: &str, results: &'a ProjectResults) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            files_analyzed: results.len(),
            total_issues: total_issues(results),
            files_failed: results.values().filter(|a| a.error.is_some()).count(),
            files: results.values().collect(),
        }
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, results: &ProjectResults, output: Option<&Path>) -> anyhow::Result<()> {
    let report = JsonReport::new(path, results);
    let json = serde_json::to_string_pretty(&report)?;
    emit(&json, output)
}

fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(file) => fs::write(file, content)?,
        None => println!("{}", content),
    }
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, results: &ProjectResults) {
    // Header
    println!();
    print!("  ");
    print!("{}", "refactorcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    let issues = total_issues(results);
    let failed = results.values().filter(|a| a.error.is_some()).count();

    for (file, analysis) in results {
        if analysis.is_clean() {
            continue;
        }
        write_file_section(file, analysis);
    }

    write_summary(results.len(), issues, failed);
    println!();
}

fn write_file_section(file: &str, analysis: &FileAnalysis) {
    println!("  {}", file.blue().bold());

    if let Some(ref error) = analysis.error {
        println!("    {} {}", "ERROR".red(), error);
        println!();
        return;
    }

    for issue in &analysis.issues {
        write_issue_tag(issue.issue_type());
        print!("{}", format!("line {}", issue.line_number()).dimmed());
        println!();
        println!("            {}", issue.description());
        if let Some(optimized) = issue.optimized_code() {
            println!("            {} {}", "->".dimmed(), optimized.green());
        }
    }
    println!();
}

fn write_issue_tag(issue_type: IssueType) {
    match issue_type {
        IssueType::HighComplexity => print!("    {} ", "COMPLEX".red()),
        IssueType::NestedLoops => print!("    {} ", "NESTED ".yellow()),
        IssueType::ListComprehensionOpportunity => print!("    {} ", "REWRITE".blue()),
    }
}

fn write_summary(files: usize, issues: usize, failed: usize) {
    if issues == 0 && failed == 0 {
        print!("  {}", "✓ CLEAN".green());
    } else {
        print!("  {}", "✗ ISSUES".red());
    }

    print!("  Files: {}", files);
    print!("  Issues: ");
    if issues == 0 {
        print!("{}", issues.to_string().green());
    } else {
        print!("{}", issues.to_string().yellow().bold());
    }

    if let Some(note) = failure_note(failed) {
        print!("  {}", note.red());
    }
    println!();
}

/// Summary note for files that could not be read or parsed.
fn failure_note(failed: usize) -> Option<String> {
    (failed > 0).then(|| format!("({} failed)", failed))
}
