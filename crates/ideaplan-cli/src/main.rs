mod blocks_cmd;
mod checklist_cmd;
mod config;
mod plan_cmd;
mod render;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use ideaplan_core::schedule::BlockCategory;
use ideaplan_core::{DurationUnit, Strategy};

use config::{ConfigFile, IdeaplanConfig, Overrides};
use plan_cmd::PlanOptions;
use render::OutputFormat;

#[derive(Parser)]
#[command(name = "ideaplan", about = "Turn a project idea into a waterfall or agile plan")]
struct Cli {
    /// Config file path (overrides IDEAPLAN_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Partition an idea's tasks into phases or sprints
    Plan {
        /// Path to the idea record (.toml or .json)
        file: PathBuf,
        /// Planning strategy: waterfall or agile
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Total project duration (omit for an unscheduled plan)
        #[arg(long, allow_negative_numbers = true)]
        duration: Option<f64>,
        /// Unit of --duration: days, weeks, or months
        #[arg(long)]
        unit: Option<DurationUnit>,
        /// Upper bound on agile sprints
        #[arg(long)]
        max_sprints: Option<u32>,
        /// Lay the plan out on the calendar from this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// QA checklist tracking
    Checklist {
        /// Checklist state file (overrides IDEAPLAN_CHECKLIST_FILE and config)
        #[arg(long)]
        state: Option<PathBuf>,

        #[command(subcommand)]
        command: ChecklistCommands,
    },
    /// Daily time blocks
    Blocks {
        /// Schedule state file (overrides IDEAPLAN_SCHEDULE_FILE and config)
        #[arg(long)]
        state: Option<PathBuf>,

        #[command(subcommand)]
        command: BlockCommands,
    },
}

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Show checklist items grouped by category
    Show,
    /// Mark an item done, or open again
    Toggle {
        /// Item ID (e.g. f1, ui2)
        id: String,
    },
    /// Attach a note to an item (empty text clears it)
    Note {
        /// Item ID (e.g. f1, ui2)
        id: String,
        /// Note text
        text: String,
    },
}

#[derive(Subcommand)]
pub enum BlockCommands {
    /// Schedule a block of time
    Add {
        /// What the block is for
        title: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: NaiveTime,
        /// End time (HH:MM), after --start
        #[arg(long)]
        end: NaiveTime,
        /// Day of the block (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// work, study, meeting, personal, or break
        #[arg(long, default_value_t = BlockCategory::Work)]
        category: BlockCategory,
        /// Optional longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a block done, or open again
    Toggle {
        /// Block ID
        id: u32,
    },
    /// Delete a block
    Rm {
        /// Block ID
        id: u32,
    },
    /// Show one day's blocks and progress
    Show {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Execute the `ideaplan init` command: write a starter config file.
fn cmd_init(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = ConfigFile::starter();
    config::save_config(path, &cfg)?;

    println!("Config written to {}", path.display());
    if let Some(strategy) = cfg.planner.strategy {
        println!("  planner.strategy = {strategy}");
    }
    if let Some(unit) = cfg.planner.unit {
        println!("  planner.unit = {unit}");
    }
    if let Some(state_file) = &cfg.checklist.state_file {
        println!("  checklist.state_file = {}", state_file.display());
    }
    if let Some(state_file) = &cfg.schedule.state_file {
        println!("  schedule.state_file = {}", state_file.display());
    }
    println!();
    println!("Next: run `ideaplan plan <idea.toml> --duration 8` to build a plan.");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Init { force } => {
            cmd_init(&config_path, force)?;
        }
        Commands::Plan {
            file,
            strategy,
            duration,
            unit,
            max_sprints,
            start,
            format,
            output,
        } => {
            let overrides = Overrides {
                strategy,
                unit,
                max_sprints,
                ..Overrides::default()
            };
            let resolved = IdeaplanConfig::resolve(&overrides, &config_path)?;
            let options = PlanOptions {
                file,
                duration,
                start,
                format,
                output,
            };
            plan_cmd::run_plan(&options, &resolved)?;
        }
        Commands::Checklist { state, command } => {
            let overrides = Overrides {
                checklist_file: state,
                ..Overrides::default()
            };
            let resolved = IdeaplanConfig::resolve(&overrides, &config_path)?;
            checklist_cmd::run_checklist_command(command, &resolved.checklist_file)
                .context("checklist command failed")?;
        }
        Commands::Blocks { state, command } => {
            let overrides = Overrides {
                schedule_file: state,
                ..Overrides::default()
            };
            let resolved = IdeaplanConfig::resolve(&overrides, &config_path)?;
            let today = Local::now().date_naive();
            blocks_cmd::run_blocks_command(command, &resolved.schedule_file, today)
                .context("blocks command failed")?;
        }
    }

    Ok(())
}
