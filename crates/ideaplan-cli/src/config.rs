//! Configuration file management for ideaplan.
//!
//! Provides a TOML-based config file at `~/.config/ideaplan/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ideaplan_core::partition::DEFAULT_MAX_SPRINTS;
use ideaplan_core::{DurationUnit, Partitioner, Strategy};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub checklist: ChecklistSection,
    #[serde(default)]
    pub schedule: ScheduleSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlannerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Unit applied to `--duration` when `--unit` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<DurationUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sprints: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChecklistSection {
    /// Where QA checklist progress is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// Where daily time blocks are stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl ConfigFile {
    /// The file `ideaplan init` writes: every setting spelled out.
    pub fn starter() -> Self {
        Self {
            planner: PlannerSection {
                strategy: Some(IdeaplanConfig::DEFAULT_STRATEGY),
                unit: Some(IdeaplanConfig::DEFAULT_UNIT),
                max_sprints: Some(DEFAULT_MAX_SPRINTS),
            },
            checklist: ChecklistSection {
                state_file: Some(default_checklist_path()),
            },
            schedule: ScheduleSection {
                state_file: Some(default_schedule_path()),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the ideaplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/ideaplan` or `~/.config/ideaplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("ideaplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ideaplan")
}

/// Return the path to the ideaplan config file.
///
/// `IDEAPLAN_CONFIG` overrides the XDG location.
pub fn config_path() -> PathBuf {
    match std::env::var("IDEAPLAN_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => config_dir().join("config.toml"),
    }
}

/// Return the ideaplan data directory.
///
/// `$XDG_DATA_HOME/ideaplan` or `~/.local/share/ideaplan`.
pub fn data_dir() -> PathBuf {
    let base = match std::env::var("XDG_DATA_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share"),
    };
    base.join("ideaplan")
}

pub fn default_checklist_path() -> PathBuf {
    data_dir().join("checklist.json")
}

pub fn default_schedule_path() -> PathBuf {
    data_dir().join("schedule.json")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Settings that may be given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub strategy: Option<Strategy>,
    pub unit: Option<DurationUnit>,
    pub max_sprints: Option<u32>,
    pub checklist_file: Option<PathBuf>,
    pub schedule_file: Option<PathBuf>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaplanConfig {
    pub strategy: Strategy,
    pub unit: DurationUnit,
    pub max_sprints: u32,
    pub checklist_file: PathBuf,
    pub schedule_file: PathBuf,
}

impl IdeaplanConfig {
    pub const DEFAULT_STRATEGY: Strategy = Strategy::Waterfall;
    pub const DEFAULT_UNIT: DurationUnit = DurationUnit::Weeks;

    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Strategy: `--strategy` > `IDEAPLAN_STRATEGY` > `planner.strategy` > waterfall
    /// - Unit: `--unit` > `IDEAPLAN_DURATION_UNIT` > `planner.unit` > weeks
    /// - Max sprints: `--max-sprints` > `IDEAPLAN_MAX_SPRINTS` > `planner.max_sprints` > 30
    /// - Checklist file: `--state` > `IDEAPLAN_CHECKLIST_FILE` > `checklist.state_file`
    ///   > XDG data dir
    /// - Schedule file: `--state` > `IDEAPLAN_SCHEDULE_FILE` > `schedule.state_file`
    ///   > XDG data dir
    pub fn resolve(cli: &Overrides, config_path: &Path) -> Result<Self> {
        let file = load_config(config_path)?.unwrap_or_default();

        let strategy = match cli.strategy {
            Some(s) => s,
            None => env_parsed("IDEAPLAN_STRATEGY")?
                .or(file.planner.strategy)
                .unwrap_or(Self::DEFAULT_STRATEGY),
        };

        let unit = match cli.unit {
            Some(u) => u,
            None => env_parsed("IDEAPLAN_DURATION_UNIT")?
                .or(file.planner.unit)
                .unwrap_or(Self::DEFAULT_UNIT),
        };

        let max_sprints = match cli.max_sprints {
            Some(m) => m,
            None => env_parsed("IDEAPLAN_MAX_SPRINTS")?
                .or(file.planner.max_sprints)
                .unwrap_or(DEFAULT_MAX_SPRINTS),
        };
        // Fail here rather than at plan time so a bad config is reported once.
        Partitioner::with_max_sprints(max_sprints).context("invalid max_sprints setting")?;

        let checklist_file = state_file(
            cli.checklist_file.as_deref(),
            "IDEAPLAN_CHECKLIST_FILE",
            file.checklist.state_file,
        )
        .unwrap_or_else(default_checklist_path);

        let schedule_file = state_file(
            cli.schedule_file.as_deref(),
            "IDEAPLAN_SCHEDULE_FILE",
            file.schedule.state_file,
        )
        .unwrap_or_else(default_schedule_path);

        Ok(Self {
            strategy,
            unit,
            max_sprints,
            checklist_file,
            schedule_file,
        })
    }

    pub fn partitioner(&self) -> Result<Partitioner> {
        Partitioner::with_max_sprints(self.max_sprints).context("invalid max_sprints setting")
    }
}

/// First of: CLI path, env var, config file path.
fn state_file(cli: Option<&Path>, env: &str, file: Option<PathBuf>) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| std::env::var(env).ok().map(PathBuf::from))
        .or(file)
}

/// Read and parse an env var. Unset is `None`; set but unparseable is an error.
fn env_parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("{name} env var is invalid")),
        Err(_) => Ok(None),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
