//! Refactorcheck CLI entry point.

use clap::Parser;
use refactorcheck::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.format_timestamp(None).init();

    let result = match &cli.command {
        Commands::Analyze(args) => cli::run_analyze(args),
        Commands::GenTests(args) => cli::run_gen_tests(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
