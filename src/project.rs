//! Project-wide analysis: find Python files under a root and analyze each.
//!
//! Files are independent units of work. They are analyzed in parallel, and
//! a file that cannot be read or parsed is recorded with an error instead
//! of aborting the scan.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect::{AnalysisEngine, Issue};

/// File extension of analyzed sources.
const PYTHON_EXTENSION: &str = "py";

/// Result of analyzing a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
    /// Set when the file could not be read or parsed; `issues` is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileAnalysis {
    fn failed(path: &Path, error: String) -> Self {
        warn!("{}: {}", path.display(), error);
        Self {
            path: path.to_path_buf(),
            issues: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.issues.is_empty()
    }
}

/// Analysis results keyed by file path, in sorted order.
pub type ProjectResults = BTreeMap<String, FileAnalysis>;

/// Files found by a walk, plus Python paths the walk could not stat.
#[derive(Debug, Default)]
struct Discovery {
    files: Vec<PathBuf>,
    unreadable: Vec<FileAnalysis>,
}

/// Analyzes every Python file below a root path.
pub struct ProjectAnalyzer {
    root: PathBuf,
    engine: AnalysisEngine,
    exclude_dirs: HashSet<String>,
    exclude_files: HashSet<String>,
    excluded_paths: GlobSet,
}

impl ProjectAnalyzer {
    /// Create an analyzer for `root`, which may be a directory or a single file.
    pub fn new<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            engine: AnalysisEngine::new(config.rules()),
            exclude_dirs: config.exclude_dirs.iter().cloned().collect(),
            exclude_files: config.exclude_files.iter().cloned().collect(),
            excluded_paths: config.excluded_path_set(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively find all Python files, sorted by path.
    ///
    /// Entries the walk cannot read are logged and skipped.
    pub fn find_python_files(&self) -> Vec<PathBuf> {
        self.discover().files
    }

    fn discover(&self) -> Discovery {
        if self.root.is_file() {
            return Discovery {
                files: vec![self.root.clone()],
                unreadable: Vec::new(),
            };
        }

        let mut found = Discovery::default();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                // The root itself is never pruned, even if its name is excluded.
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !self
                        .exclude_dirs
                        .contains(e.file_name().to_string_lossy().as_ref())
            })
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    match err.path() {
                        Some(path) if self.is_candidate(path) => found
                            .unreadable
                            .push(FileAnalysis::failed(path, format!("IoError: {}", err))),
                        _ => warn!("skipping unreadable entry: {}", err),
                    }
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_candidate(entry.path()) {
                found.files.push(entry.path().to_path_buf());
            }
        }

        found.files.sort();
        found
    }

    /// Whether `path` is a Python file not excluded by name or glob.
    fn is_candidate(&self, path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some(PYTHON_EXTENSION) {
            return false;
        }

        let excluded_name = path
            .file_name()
            .map(|name| self.exclude_files.contains(name.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if excluded_name {
            return false;
        }

        let rel_path = path.strip_prefix(&self.root).unwrap_or(path);
        !self.excluded_paths.is_match(rel_path)
    }

    /// Analyze every discovered file. A file that cannot be read or parsed
    /// is recorded with an error and never affects the others.
    pub fn analyze_project(&self) -> ProjectResults {
        let Discovery { files, unreadable } = self.discover();
        info!("analyzing {} file(s) under {}", files.len(), self.root.display());

        let mut results: ProjectResults = files
            .par_iter()
            .map(|path| {
                let analysis = self.analyze_file(path);
                (path.to_string_lossy().to_string(), analysis)
            })
            .collect();

        for analysis in unreadable {
            results.insert(analysis.path.to_string_lossy().to_string(), analysis);
        }

        let failed = results.values().filter(|a| a.error.is_some()).count();
        info!(
            "analyzed {} file(s), {} issue(s), {} failure(s)",
            results.len(),
            total_issues(&results),
            failed
        );

        results
    }

/// Analyze one file, capturing read and parse failures in the result.
    pub fn analyze_file(&self, path: &Path) -> FileAnalysis {
        let outcome = fs::read_to_string(path)
            .map_err(|e| format!("IoError: {}", e))
            .and_then(|source| {
                self.engine
                    .analyze(&source)
                    .map_err(|e| format!("SyntaxError: {}", e))
            });

        match outcome {
            Ok(issues) => FileAnalysis {
                path: path.to_path_buf(),
                issues,
                error: None,
            },
            Err(error) => FileAnalysis::failed(path, error),
        }
    }
}

/// Total number of issues across all files.
pub fn total_issues(results: &ProjectResults) -> usize {
    results.values().map(|a| a.issues.len()).sum()
}
