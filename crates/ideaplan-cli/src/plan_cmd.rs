//! `ideaplan plan <idea-file>`: partition an idea into phases and print them.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ideaplan_core::timeline::project_onto;
use ideaplan_core::{Duration, load_idea};

use crate::config::IdeaplanConfig;
use crate::render::{OutputFormat, PlanReport};

/// Per-invocation options; strategy and unit come from the resolved config.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub file: PathBuf,
    pub duration: Option<f64>,
    pub start: Option<NaiveDate>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Load the idea, build the plan and write it to stdout or `--output`.
pub fn run_plan(options: &PlanOptions, config: &IdeaplanConfig) -> Result<()> {
    let rendered = render_plan(options, config)?;

    match &options.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("cannot write output file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote plan");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Produce the rendered plan text without writing it anywhere.
pub fn render_plan(options: &PlanOptions, config: &IdeaplanConfig) -> Result<String> {
    let idea = load_idea(&options.file)
        .with_context(|| format!("failed to load idea file: {}", options.file.display()))?;

    let duration = options
        .duration
        .map(|value| Duration::new(value, config.unit))
        .transpose()
        .context("invalid --duration")?;

    let plan = config
        .partitioner()?
        .plan(duration, &idea.task_pool(), config.strategy)
        .with_context(|| format!("cannot plan {:?}", idea.idea_name))?;

    let calendar = options
        .start
        .map(|start| project_onto(&plan, start))
        .transpose()
        .context("--start needs a scheduled plan; pass --duration")?;

    PlanReport::new(&idea.idea_name, &plan, calendar.as_deref()).render(options.format)
}
