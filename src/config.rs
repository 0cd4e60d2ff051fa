//! Configuration for refactorcheck.
//!
//! A config file tunes rule thresholds and decides which files a project
//! scan visits. Every field is optional; defaults match the built-in rules.

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::{RuleConfig, DEFAULT_COMPLEXITY_THRESHOLD, DEFAULT_MAX_LOOP_DEPTH};

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["refactorcheck.yaml", ".refactorcheck.yaml"];

/// Directory names skipped during a project scan unless overridden.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["venv", ".git", "__pycache__", "build", "dist"];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Functions with cyclomatic complexity above this are reported.
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: u32,
    /// For-loops nested deeper than this are reported.
    #[serde(default = "default_max_loop_depth")]
    pub max_loop_depth: usize,
    /// Directory names to skip (matched against each path component).
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// File names to skip.
    #[serde(default)]
    pub exclude_files: Vec<String>,
    /// Glob patterns for paths to skip, relative to the scan root (e.g. "**/migrations/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_complexity_threshold() -> u32 {
    DEFAULT_COMPLEXITY_THRESHOLD
}

fn default_max_loop_depth() -> usize {
    DEFAULT_MAX_LOOP_DEPTH
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            max_loop_depth: default_max_loop_depth(),
            exclude_dirs: default_exclude_dirs(),
            exclude_files: Vec::new(),
            excluded_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a config file in `dir`, if one exists.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Thresholds for the analysis engine.
    pub fn rules(&self) -> RuleConfig {
        RuleConfig {
            complexity_threshold: self.complexity_threshold,
            max_loop_depth: self.max_loop_depth,
        }
    }

    /// Render as YAML (used by `init`).
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Compile `excluded_paths` into one matcher. Patterns that fail to
    /// compile are skipped; `validate` reports them.
    pub fn excluded_path_set(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!("ignoring excluded_paths pattern {:?}: {}", pattern, e),
            }
        }
        builder.build().unwrap_or_else(|e| {
            warn!("ignoring excluded_paths: {}", e);
            GlobSet::empty()
        })
    }
}

/// Validate a config for semantic errors.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.complexity_threshold == 0 {
        anyhow::bail!("complexity_threshold must be at least 1");
    }

    if config.max_loop_depth == 0 {
        anyhow::bail!("max_loop_depth must be at least 1");
    }

    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
complexity_threshold: 15
exclude_files:
  - "setup.py"
excluded_paths:
  - "**/migrations/**"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.complexity_threshold, 15);
        assert_eq!(config.max_loop_depth, DEFAULT_MAX_LOOP_DEPTH);
        assert_eq!(config.exclude_dirs, default_exclude_dirs());
        assert_eq!(config.exclude_files, vec!["setup.py"]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rules(), RuleConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            complexity_threshold: 0,
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            max_loop_depth: 0,
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            excluded_paths: vec!["[invalid".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excluded_path_set() {
        let config = Config {
            excluded_paths: vec!["**/migrations/**".to_string(), "*_pb2.py".to_string()],
            ..Default::default()
        };
        let excluded = config.excluded_path_set();

        assert!(excluded.is_match(Path::new("app/migrations/0001_initial.py")));
        assert!(excluded.is_match(Path::new("proto_pb2.py")));
        assert!(!excluded.is_match(Path::new("app/models.py")));
        assert!(Config::default().excluded_path_set().is_empty());
    }

    #[test]
    fn test_excluded_path_set_skips_invalid_patterns() {
        let config = Config {
            excluded_paths: vec!["[invalid".to_string(), "gen/**".to_string()],
            ..Default::default()
        };
        let excluded = config.excluded_path_set();

        assert_eq!(excluded.len(), 1);
        assert!(excluded.is_match(Path::new("gen/api.py")));
    }

    #[test]
    fn test_yaml_round_trip_and_discover() {
        let temp = TempDir::new().unwrap();
        assert!(Config::discover(temp.path()).is_none());

        let path = temp.path().join("refactorcheck.yaml");
        std::fs::write(&path, Config::default().to_yaml().unwrap()).unwrap();

        assert_eq!(Config::discover(temp.path()), Some(path.clone()));
        assert_eq!(Config::parse_file(&path).unwrap(), Config::default());
    }
}
