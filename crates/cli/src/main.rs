mod config;
mod runner;
mod tap;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use shapematch_core::{Mismatch, Signature, Value};

use crate::config::Config;

/// Exit status when the value does not match or a case fails.
const EXIT_MISMATCH: i32 = 1;
/// Exit status for unreadable input, bad configuration, or match errors.
const EXIT_ERROR: i32 = 2;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Structural shape matching for JSON data.
#[derive(Parser)]
#[command(
    name = "shapematch",
    version,
    about = "Structural shape matching for JSON data"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a shapematch.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a JSON value against a JSON signature
    Check {
        /// Path to the value JSON file
        value: PathBuf,
        /// Path to the signature JSON file
        signature: PathBuf,
    },

    /// Run a directory of *.case.json match cases and report TAP
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&format!("error: {}", msg), cli.output, cli.quiet);
            process::exit(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::Check { value, signature } => {
            cmd_check(&value, &signature, &config, cli.output, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            cmd_test(&suite_dir, &config, cli.output, cli.quiet);
        }
    }
}

fn cmd_check(
    value_path: &Path,
    signature_path: &Path,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let reader = config.reader();

    let value_json = read_json_or_exit(value_path, output, quiet);
    let value: Value = match reader.read_value(&value_json) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid value in {}: {}", value_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(EXIT_ERROR);
        }
    };

    let signature_json = read_json_or_exit(signature_path, output, quiet);
    let signature: Signature = match reader.read_signature(&signature_json) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!(
                "error: invalid signature in {}: {}",
                signature_path.display(),
                e
            );
            report_error(&msg, output, quiet);
            process::exit(EXIT_ERROR);
        }
    };

    let outcome = match config.matcher().explain(&value, &signature) {
        Ok(outcome) => outcome,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(EXIT_ERROR);
        }
    };

    if !quiet {
        match output {
            OutputFormat::Text => match &outcome {
                None => println!("match"),
                Some(m) => println!("mismatch: {}", m),
            },
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "matches": outcome.is_none(),
                    "mismatch": outcome.as_ref().map(mismatch_json),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
    }

    if outcome.is_some() {
        process::exit(EXIT_MISMATCH);
    }
}

fn cmd_test(suite_dir: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    match runner::run_suite(suite_dir, config) {
        Ok(result) if result.failed > 0 => process::exit(EXIT_MISMATCH),
        Ok(_) => {}
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(EXIT_ERROR);
        }
    }
}

fn mismatch_json(m: &Mismatch) -> serde_json::Value {
    serde_json::json!({
        "path": m.path.to_string(),
        "reason": m.reason.to_string(),
    })
}

fn read_json_or_exit(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let src = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error: cannot read {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(EXIT_ERROR);
        }
    };
    match serde_json::from_str(&src) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid JSON in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(EXIT_ERROR);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
