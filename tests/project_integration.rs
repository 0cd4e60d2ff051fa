//! Integration tests for project scans against the testdata fixtures.

use std::path::PathBuf;

use refactorcheck::project::total_issues;
use refactorcheck::report::render_markdown;
use refactorcheck::{Config, IssueType, ProjectAnalyzer};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("project")
}

fn key(rel: &str) -> String {
    fixture_root().join(rel).to_string_lossy().to_string()
}

#[test]
fn test_default_exclusions() {
    let analyzer = ProjectAnalyzer::new(fixture_root(), &Config::default());
    let files = analyzer.find_python_files();

    let names: Vec<String> = files
        .iter()
        .map(|f| {
            f.strip_prefix(fixture_root())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        names,
        vec![
            "broken.py",
            "clean.py",
            "matrix.py",
            "pkg/grading.py",
            "squares.py",
        ]
    );
}

#[test]
fn test_project_results() {
    let analyzer = ProjectAnalyzer::new(fixture_root(), &Config::default());
    let results = analyzer.analyze_project();

    assert_eq!(results.len(), 5);
    assert_eq!(total_issues(&results), 4);

    let broken = &results[&key("broken.py")];
    assert!(broken.error.as_deref().unwrap().starts_with("SyntaxError"));

    assert!(results[&key("clean.py")].is_clean());

    let matrix: Vec<IssueType> = results[&key("matrix.py")]
        .issues
        .iter()
        .map(|i| i.issue_type())
        .collect();
    assert_eq!(
        matrix,
        vec![IssueType::NestedLoops, IssueType::ListComprehensionOpportunity]
    );

    let grading = &results[&key("pkg/grading.py")].issues;
    assert_eq!(grading.len(), 1);
    assert_eq!(
        grading[0].description(),
        "Function 'grade' has high cyclomatic complexity (12)"
    );
}

#[test]
fn test_config_excludes_files_and_paths() {
    let config = Config {
        exclude_files: vec!["broken.py".to_string()],
        excluded_paths: vec!["pkg/**".to_string()],
        ..Config::default()
    };
    let analyzer = ProjectAnalyzer::new(fixture_root(), &config);
    let results = analyzer.analyze_project();

    assert_eq!(results.len(), 3);
    assert!(results.values().all(|a| a.error.is_none()));
}

#[test]
fn test_markdown_report_for_project() {
    let analyzer = ProjectAnalyzer::new(fixture_root(), &Config::default());
    let results = analyzer.analyze_project();
    let report = render_markdown(&results);

    assert!(report.starts_with("# Code Analysis Report"));
    assert!(report.contains("Total files analyzed: 5"));
    assert!(report.contains("Total issues found: 4"));
    assert!(report.contains(&format!("## {}", key("squares.py"))));
    assert!(report.contains("### Line 3: list_comprehension"));
    assert!(report.contains("[num * num for num in numbers]"));
    assert!(report.contains("⚠️ Error: SyntaxError"));
    assert!(report.contains("✅ No issues found"));
}
