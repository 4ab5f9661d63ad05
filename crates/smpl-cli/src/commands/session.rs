//! `smpl session`: generate once, then shrink, expand and restore the DSL.
//!
//! With `--steps` the lifecycle runs unattended in the order given. Without
//! it the user picks each step from a menu (needs the `interactive` feature
//! and a terminal).

use std::sync::Arc;

use smpl_core::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    cli::{SessionArgs, SessionStep, View},
    commands::{build_generator, generate::print_views, read_text, resolve_mode, resolve_tool},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Everything a step needs, captured once at the start.
struct Run<'a> {
    session: SessionService,
    mode: Mode,
    tool: ExportTool,
    output: &'a OutputManager,
    /// Snapshots collected for `--output-format json`.
    trail: Vec<serde_json::Value>,
}

#[instrument(skip_all)]
pub async fn execute(args: SessionArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let text = read_text(args.input.text.as_deref(), args.input.file.as_deref())?;
    let mode = resolve_mode(args.input.mode, config);
    let tool = resolve_tool(args.input.tool.as_deref(), config);
    let generator = build_generator(&args.input, config, true)?;

    let mut run = Run {
        session: SessionService::new(Arc::new(generator)),
        mode,
        tool,
        output,
        trail: Vec::new(),
    };

    let spinner = output.spinner(format!("Generating {mode} schema for {}", tool.label()));
    let settled = run.session.generate(&text, mode, tool).await;
    spinner.finish_and_clear();
    run.report("generate", settled?)?;

    if args.steps.is_empty() {
        interactive(&mut run).await?;
    } else {
        for step in &args.steps {
            run.step(*step).await?;
        }
    }

    if output.is_json() {
        output.json(&run.trail)?;
    }
    Ok(())
}

impl Run<'_> {
    async fn step(&mut self, step: SessionStep) -> CliResult<()> {
        match step {
            SessionStep::Shrink => {
                let spinner = self
                    .output
                    .spinner(format!("Shrinking for {} ({})", self.tool.label(), self.tool.strategy()));
                let settled = self.session.shrink(self.mode, self.tool).await;
                spinner.finish_and_clear();
                self.report("shrink", settled?)
            }
            SessionStep::Expand => {
                let spinner = self.output.spinner(format!("Expanding for {}", self.tool.label()));
                let settled = self.session.expand(self.mode, self.tool).await;
                spinner.finish_and_clear();
                self.report("expand", settled?)
            }
            SessionStep::Restore => {
                let snapshot = self.session.restore(self.mode)?;
                self.show("restore", &snapshot)
            }
            SessionStep::Show => {
                let snapshot = self.session.snapshot(self.mode)?;
                if self.output.is_json() {
                    return self.show("show", &snapshot);
                }
                print_views(
                    self.output,
                    &[View::All],
                    &snapshot.slots,
                    snapshot.stats.as_ref(),
                    self.tool,
                )?;
                Ok(())
            }
        }
    }

    fn report(&mut self, step: &str, settled: Settled) -> CliResult<()> {
        match settled {
            Settled::Applied(snapshot) => self.show(step, &snapshot),
            Settled::Discarded => {
                warn!(step, "Result arrived after a newer generation and was dropped");
                self.output.warning(&format!("{step} result was superseded"))?;
                Ok(())
            }
        }
    }

    fn show(&mut self, step: &str, snapshot: &ModeSnapshot) -> CliResult<()> {
        info!(step, state = ?snapshot.state, epoch = snapshot.epoch, "Session step applied");
        if self.output.is_json() {
            self.trail.push(serde_json::json!({ "step": step, "snapshot": snapshot }));
            return Ok(());
        }

        let state = match snapshot.state {
            DslState::Pristine => "original",
            DslState::Modified => "modified",
        };
        self.output.success(&format!("{step}: DSL is {state}"))?;
        if step == "expand" {
            self.output.section("Expanded", &snapshot.slots.expanded)?;
        } else {
            self.output.section("SMPL DSL", snapshot.dsl())?;
        }
        if let Some(stats) = &snapshot.stats {
            self.output.section("Tokens", &stats.report())?;
        }
        Ok(())
    }
}

#[cfg(feature = "interactive")]
async fn interactive(run: &mut Run<'_>) -> CliResult<()> {
    use dialoguer::{Select, theme::ColorfulTheme};
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || run.output.is_json() {
        return Err(CliError::invalid_input(
            "an interactive session needs a terminal; pass --steps instead",
        ));
    }

    const CHOICES: [(&str, Option<SessionStep>); 5] = [
        ("Shrink DSL", Some(SessionStep::Shrink)),
        ("Expand to prompt", Some(SessionStep::Expand)),
        ("Restore original DSL", Some(SessionStep::Restore)),
        ("Show everything", Some(SessionStep::Show)),
        ("Quit", None),
    ];
    let labels: Vec<&str> = CHOICES.iter().map(|(label, _)| *label).collect();
    let theme = ColorfulTheme::default();

    loop {
        let picked = Select::with_theme(&theme)
            .with_prompt("Next step")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| CliError::invalid_input(format!("prompt failed: {e}")))?;

        let Some(step) = picked.and_then(|i| CHOICES[i].1) else {
            return Ok(());
        };
        // Lifecycle misuse (e.g. restore before shrink) is reported and the
        // loop continues.
        if let Err(e) = run.step(step).await {
            match e {
                CliError::Core(core) if core.category() == smpl_core::error::ErrorCategory::State => {
                    run.output.warning(&core.to_string())?;
                }
                other => return Err(other),
            }
        }
    }
}

#[cfg(not(feature = "interactive"))]
async fn interactive(_run: &mut Run<'_>) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
