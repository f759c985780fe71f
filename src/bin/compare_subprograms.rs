//! compare-subprograms CLI tool
//!
//! Compares a reference subprogram listing with one produced by the tool
//! under test. Exit status 0 means every differing address passed.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use subprogram_compare::{compare, report, Comparator};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "compare-subprograms")]
#[command(about = "Executable tool for comparing two files containing list of subprograms")]
struct Cli {
    /// Reference file containing a list of subprograms
    #[arg(long, env = "SUBPROGRAM_REFERENCE")]
    reference: Option<PathBuf>,

    /// File generated by the tool under test containing a list of subprograms
    #[arg(long, visible_alias = "pindwarf", env = "SUBPROGRAM_CANDIDATE")]
    candidate: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Classify addresses in parallel (same report, same order)
    #[arg(long)]
    parallel: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Optional .env with SUBPROGRAM_REFERENCE / SUBPROGRAM_CANDIDATE, working directory only
    let env_file = dotenvy::from_filename(".env").ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose);
    if let Some(path) = env_file {
        debug!(path = %path.display(), "loaded env file");
    }

    let Some((reference, candidate)) = validate_paths(&cli) else {
        return ExitCode::FAILURE;
    };

    match run(&cli, reference, candidate) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Usage checks. Prints the diagnostic and returns `None` on the first problem.
fn validate_paths(cli: &Cli) -> Option<(&Path, &Path)> {
    let Some(reference) = cli.reference.as_deref() else {
        println!("Missing --reference");
        return None;
    };
    let Some(candidate) = cli.candidate.as_deref() else {
        println!("Missing --candidate");
        return None;
    };
    for path in [reference, candidate] {
        if !path.exists() {
            println!("File does not exist ({})", path.display());
            return None;
        }
    }
    Some((reference, candidate))
}

fn run(cli: &Cli, reference: &Path, candidate: &Path) -> Result<bool> {
    if cli.format == Format::Text && !cli.parallel {
        return compare(reference, candidate).context("Comparison failed");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    // header precedes the run, as in `compare_to`
    if cli.format == Format::Text {
        report::write_header(&mut out, reference, candidate).context("Failed to write report")?;
    }

    let comparison = Comparator::new()
        .parallel(cli.parallel)
        .run(reference, candidate)
        .context("Comparison failed")?;

    match cli.format {
        Format::Text => report::write_verdicts(&mut out, &comparison),
        Format::Json => report::write_json(&mut out, &comparison),
    }
    .context("Failed to write report")?;

    Ok(comparison.passed)
}
