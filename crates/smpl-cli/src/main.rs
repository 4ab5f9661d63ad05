//! # SMPL CLI
//!
//! Turns freeform descriptions into canonical schemas, a compact DSL and
//! export prompts for AI coding tools.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments (clap handles `--help` / `--version`).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler on a tokio runtime.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                       |
//! |------|-------------------------------|
//! |  0   | Success                       |
//! |  1   | Internal / system error       |
//! |  2   | User / input error            |
//! |  3   | File not found                |
//! |  4   | Configuration error           |
//! |  5   | Language model unavailable    |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    // Held until exit so the log file writer flushes.
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    let json_errors = cli.global.output_format == cli::OutputFormat::Json;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_deref())
        .with_cli_context(|| "Failed to load configuration")
    {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose, json_errors),
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let json_errors = output.is_json();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            return handle_error(
                CliError::IoError {
                    message: "Failed to start the async runtime".into(),
                    source: e,
                },
                verbose,
                json_errors,
            );
        }
    };

    match runtime.block_on(run(cli.command, config, output)) {
        Ok(()) => {
            info!("smpl completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, json_errors),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
async fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, &config, &output).await,
        Commands::Enhance(args) => commands::enhance::execute(args, &config, &output).await,
        Commands::Render(args) => commands::render::execute(args, &config, &output),
        Commands::Tokens(args) => commands::tokens::execute(args, &config, &output),
        Commands::Tools(args) => commands::tools::execute(args, &output),
        Commands::Session(args) => commands::session::execute(args, &config, &output).await,
        Commands::History(args) => commands::history::execute(args, &config, &output),
        Commands::Init(args) => commands::init::execute(args, &output),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, &output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool, json: bool) -> ExitCode {
    err.log();

    // stderr so the message appears even when stdout is redirected
    let msg = if json {
        format!("{}\n", err.to_json())
    } else if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        // Clap's internal consistency check: catches missing values, conflicts, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }
}
