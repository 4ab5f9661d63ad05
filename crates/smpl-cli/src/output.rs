//! Output management and formatting.
//!
//! Status lines (`success`, `info`, ...) respect `--quiet`. Results
//! (`section`, `emit`, `json`) are the command's product and always print.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => match config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "plain" => OutputFormat::Plain,
                _ => OutputFormat::Auto,
            },
            explicit => explicit,
        };
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Status lines ───────────────────────────────────────────────────────

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`. Goes to stderr so pipes stay clean.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        Term::stderr().write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Results ────────────────────────────────────────────────────────────

    /// A titled block of output. The title is dropped in plain mode so the
    /// body can be piped as-is.
    pub fn section(&self, title: &str, body: &str) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Human {
            let rule = "─".repeat(title.chars().count() + 6);
            if self.no_color {
                self.term.write_line(&format!("\n── {title} ──"))?;
                self.term.write_line(body)?;
                self.term.write_line(&rule)
            } else {
                self.term.write_line(&format!(
                    "\n{} {} {}",
                    "──".dimmed(),
                    title.cyan().bold(),
                    "──".dimmed()
                ))?;
                self.term.write_line(body)?;
                self.term.write_line(&rule.dimmed().to_string())
            }
        } else {
            self.term.write_line(body)
        }
    }

    /// Write a result line, regardless of `--quiet`.
    pub fn emit(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    /// Serialize `value` as pretty JSON to stdout.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// A spinner on stderr while a model call runs.
    ///
    /// Hidden when quiet, when emitting JSON, or when stderr is not a TTY.
    pub fn spinner(&self, msg: impl Into<String>) -> ProgressBar {
        if self.quiet || self.is_json() || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        let msg: String = msg.into();
        pb.set_message(msg);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
