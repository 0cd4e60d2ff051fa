//! Command-line interface for refactorcheck.

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, Config, DEFAULT_CONFIG_NAMES};
use crate::project::{ProjectAnalyzer, ProjectResults};
use crate::report;
use crate::testgen::TestSkeletonGenerator;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Python refactoring assistant.
///
/// Refactorcheck scans Python sources for functions with high cyclomatic
/// complexity, deeply nested loops, and accumulation loops that read better
/// as list comprehensions. It can also scaffold a unittest module for the
/// functions in a file.
#[derive(Parser)]
#[command(name = "refactorcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a Python file or project
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Generate a unittest skeleton for the functions in a file
    GenTests(GenTestsArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or markdown
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Write the report to a file instead of stdout (json and markdown only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// File name to skip (repeatable)
    #[arg(long = "exclude-file")]
    pub exclude_files: Vec<String>,

    /// Report functions whose complexity exceeds this value
    #[arg(long)]
    pub complexity_threshold: Option<u32>,

    /// Report for-loops nested deeper than this
    #[arg(long)]
    pub max_loop_depth: Option<usize>,
}

/// Arguments for the gen-tests command.
#[derive(Parser)]
pub struct GenTestsArgs {
    /// Python file to generate tests for
    pub file: PathBuf,

    /// Module name to import (default: file stem)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "refactorcheck.yaml")]
    pub output: PathBuf,
}

/// Load the config named on the command line, or discover one in the
/// working directory, then apply command-line overrides.
fn load_config(args: &AnalyzeArgs) -> anyhow::Result<Config> {
    let path = match &args.config {
        Some(p) => Some(p.clone()),
        None => Config::discover("."),
    };

    let mut config = match path {
        Some(p) => {
            debug!("loading config from {}", p.display());
            Config::parse_file(&p)
                .map_err(|e| anyhow::anyhow!("error parsing config {}: {}", p.display(), e))?
        }
        None => {
            debug!(
                "no config file found (looked for {}), using defaults",
                DEFAULT_CONFIG_NAMES.join(", ")
            );
            Config::default()
        }
    };

    config.exclude_dirs.extend(args.exclude_dirs.iter().cloned());
    config.exclude_files.extend(args.exclude_files.iter().cloned());
    if let Some(threshold) = args.complexity_threshold {
        config.complexity_threshold = threshold;
    }
    if let Some(depth) = args.max_loop_depth {
        config.max_loop_depth = depth;
    }

    Ok(config)
}

/// Exit code for a finished analysis.
pub fn exit_code_for(results: &ProjectResults) -> i32 {
    if results.values().all(|a| a.is_clean()) {
        EXIT_SUCCESS
    } else {
        EXIT_ISSUES
    }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if !matches!(args.format.as_str(), "pretty" | "json" | "markdown") {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'markdown'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    if !args.path.exists() {
        eprintln!("Error: cannot access path {:?}", args.path);
        return Ok(EXIT_ERROR);
    }

    let analyzer = ProjectAnalyzer::new(&args.path, &config);
    let results = analyzer.analyze_project();

    if results.is_empty() {
        eprintln!("Warning: no Python files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let path_str = args.path.to_string_lossy().to_string();
    let output = args.output.as_deref();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &results, output)?,
        "markdown" => report::write_markdown(&results, output)?,
        _ => report::write_pretty(&path_str, &results),
    }

    if let Some(out) = output {
        info!("report written to {}", out.display());
    }

    Ok(exit_code_for(&results))
}

/// Module name used when none is given: the file stem.
fn default_module_name(file: &Path) -> Option<String> {
    file.file_stem().map(|s| s.to_string_lossy().to_string())
}

/// Run the gen-tests command.
pub fn run_gen_tests(args: &GenTestsArgs) -> anyhow::Result<i32> {
    let source = match fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", args.file.display(), e);
            return Ok(EXIT_ERROR);
        }
    };

    let module_name = match args.module.clone().or_else(|| default_module_name(&args.file)) {
        Some(m) => m,
        None => {
            eprintln!("Error: cannot derive a module name from {}", args.file.display());
            eprintln!("Pass one with --module");
            return Ok(EXIT_ERROR);
        }
    };

    let generator = TestSkeletonGenerator::new(module_name);
    let rendered = match generator.generate(&source) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}: {}", args.file.display(), e);
            return Ok(EXIT_ERROR);
        }
    };

    match &args.output {
        Some(out) => {
            fs::write(out, &rendered)?;
            println!("Created {}", out.display());
        }
        None => println!("{}", rendered),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    let content = Config::default().to_yaml()?;
    if let Err(e) = fs::write(&args.output, content) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: refactorcheck analyze . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
