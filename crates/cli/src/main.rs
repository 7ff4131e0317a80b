// crtcheck - re-grade a scored CRT item table against its answer key
// Zero arguments runs the stock check; every flag is optional.

mod exit_codes;
mod logging;
mod root;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crtcheck_recon::report::{write_item_tallies, write_report};
use crtcheck_recon::{CheckConfig, CheckError};

use exit_codes::{check_exit_code, EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "crtcheck")]
#[command(about = "Cross-check CRT item correctness counts against the answer key")]
#[command(version)]
#[command(after_help = "\
Reads (relative to the repository root):
  outputs/sanity/crt_item_correctness.csv
  data/hb_crt_answer_key.json

Examples:
  crtcheck
  crtcheck --by-item
  crtcheck --json > crt_check.json
  crtcheck --root ../study --config crt7.toml")]
struct Cli {
    /// Repository root (default: nearest ancestor containing data/)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// TOML config overriding scale, input paths and item naming
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output the full result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Append per-item tallies of responses counted correct / incorrect
    #[arg(long, conflicts_with = "json")]
    by_item: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logging(cli.verbose);

    match cmd_check(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with the registered exit code.
    pub fn check(err: CheckError) -> Self {
        Self {
            code: check_exit_code(&err),
            message: err.to_string(),
            hint: err.hint().map(str::to_string),
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// check
// ============================================================================

fn load_config(path: Option<&PathBuf>) -> Result<CheckConfig, CliError> {
    let Some(path) = path else {
        return Ok(CheckConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    CheckConfig::from_toml(&text).map_err(CliError::check)
}

fn cmd_check(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_ref())?;

    if let Some(ref root) = cli.root {
        if !root.is_dir() {
            return Err(CliError::args(format!("--root is not a directory: {}", root.display()))
                .with_hint("pass the repository that contains data/ and outputs/"));
        }
    }

    let exe = std::env::current_exe().ok();
    let cwd = std::env::current_dir()
        .map_err(|e| CliError::io(format!("cannot read working directory: {e}")))?;
    let root = root::resolve_root(cli.root, exe.as_deref(), &cwd);
    tracing::info!(root = %root.display(), scale = %config.scale, "checking responses");

    let input = crtcheck_recon::load_inputs(&root, &config).map_err(CliError::check)?;
    let result = crtcheck_recon::run(&config, &input).map_err(CliError::check)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if cli.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        writeln!(out, "{json_str}")
    } else {
        write_report(&mut out, &result).and_then(|()| {
            if cli.by_item {
                write_item_tallies(&mut out, &result)
            } else {
                Ok(())
            }
        })
    };
    written.map_err(|e| CliError::io(format!("cannot write report: {e}")))?;

    Ok(())
}
