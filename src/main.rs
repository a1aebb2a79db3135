//! Command-line entry point for the record reducer.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use record_reducer::{
    OutputEncoding, RecoveryMode, Reducer, ReducerConfig, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
use tracing::{debug, trace};

/// Reduce catalogued coin records to the memory game's JSON file
#[derive(Parser, Debug)]
#[command(name = "record-reducer", version)]
#[command(about = "Reduce catalogued coin records to id, uri, title, year and owner", long_about = None)]
struct Cli {
    /// Input JSON array of records
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file, replaced on success
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skip records without an identifier instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Write skipped records to this file (with --skip-invalid)
    #[arg(long, requires = "skip_invalid")]
    skip_report: Option<PathBuf>,

    /// Escape non-ASCII characters as \uXXXX
    #[arg(long)]
    ascii: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> ReducerConfig {
        let mut config = ReducerConfig::new(&self.input, &self.output)
            .with_recovery_mode(if self.skip_invalid {
                RecoveryMode::Lenient
            } else {
                RecoveryMode::Strict
            })
            .with_encoding(if self.ascii {
                OutputEncoding::Ascii
            } else {
                OutputEncoding::Utf8
            });
        if let Some(path) = &self.skip_report {
            config = config.with_skip_report(path);
        }
        config
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let reducer = Reducer::new(cli.config());
    debug!(config = ?reducer.config(), "starting run");

    let report = reducer
        .run(|line| println!("{line}"))
        .with_context(|| format!("reducing {}", cli.input.display()))?;

    if !report.skipped.is_empty() {
        eprintln!(
            "Skipped {} of {} records",
            report.skipped.len(),
            report.records_read
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
