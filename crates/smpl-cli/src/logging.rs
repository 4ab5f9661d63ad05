//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `smpl-core` and
//! `smpl-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire. When
/// `--log-file` is given the returned guard flushes the file writer on drop;
/// keep it alive until the process exits.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Option<WorkerGuard>> {
    let level = derive_level(args);

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_filter(build_filter(level));

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(build_filter(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(guard)
}

/// `RUST_LOG` wins; otherwise every smpl crate gets the same level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    format!("smpl={level},smpl_core={level},smpl_adapters={level}")
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path '{}' has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory '{}'", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
