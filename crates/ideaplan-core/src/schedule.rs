//! Daily time blocks.
//!
//! A schedule is a flat list of blocks, each pinned to one calendar date with
//! a start and end time of day. Blocks are kept sorted by date, then start
//! time, and stored as a JSON array in a local state file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::Progress;

/// What a block of time is spent on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    #[default]
    Work,
    Study,
    Meeting,
    Personal,
    Break,
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlockCategory::Work => "work",
            BlockCategory::Study => "study",
            BlockCategory::Meeting => "meeting",
            BlockCategory::Personal => "personal",
            BlockCategory::Break => "break",
        };
        f.write_str(s)
    }
}

impl FromStr for BlockCategory {
    type Err = BlockCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(BlockCategory::Work),
            "study" => Ok(BlockCategory::Study),
            "meeting" => Ok(BlockCategory::Meeting),
            "personal" => Ok(BlockCategory::Personal),
            "break" => Ok(BlockCategory::Break),
            other => Err(BlockCategoryParseError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCategoryParseError(pub String);

impl fmt::Display for BlockCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid block category: {:?} (expected work, study, meeting, personal, or break)",
            self.0
        )
    }
}

impl std::error::Error for BlockCategoryParseError {}

/// A scheduled block of time on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    #[serde(default)]
    pub category: BlockCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for [`Schedule::add`].
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub title: String,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub category: BlockCategory,
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("time block title must not be empty")]
    BlankTitle,

    #[error("time block must end after it starts ({starts_at} -> {ends_at})")]
    EndBeforeStart {
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    },

    #[error("no time block with id {0}")]
    UnknownBlock(u32),

    #[error("failed to access schedule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schedule file {path} is not valid: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    blocks: Vec<TimeBlock>,
}

impl Schedule {
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Load blocks from `path`. A missing file is an empty schedule.
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no schedule file, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ScheduleError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ScheduleError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write the schedule to `path` as pretty JSON, creating parent dirs.
    pub fn save(&self, path: &Path) -> Result<(), ScheduleError> {
        let io_err = |source| ScheduleError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ScheduleError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, contents).map_err(io_err)
    }

    /// Validate and insert a block. Returns the new block's id.
    ///
    /// Title and description are trimmed; a blank description is dropped.
    pub fn add(&mut self, new: NewBlock) -> Result<u32, ScheduleError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(ScheduleError::BlankTitle);
        }
        if new.ends_at <= new.starts_at {
            return Err(ScheduleError::EndBeforeStart {
                starts_at: new.starts_at,
                ends_at: new.ends_at,
            });
        }

        let id = self.blocks.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let description = new
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        self.blocks.push(TimeBlock {
            id,
            title: title.to_owned(),
            date: new.date,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            category: new.category,
            description,
            completed: false,
            created_at: Utc::now(),
        });
        self.blocks.sort_by_key(|b| (b.date, b.starts_at));
        tracing::debug!(id, date = %new.date, "added time block");
        Ok(id)
    }

    /// Flip a block's completed flag. Returns the new state.
    pub fn toggle(&mut self, id: u32) -> Result<bool, ScheduleError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ScheduleError::UnknownBlock(id))?;
        block.completed = !block.completed;
        Ok(block.completed)
    }

    /// Delete a block and return it.
    pub fn remove(&mut self, id: u32) -> Result<TimeBlock, ScheduleError> {
        let idx = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(ScheduleError::UnknownBlock(id))?;
        Ok(self.blocks.remove(idx))
    }

    /// Blocks on `date`, earliest first.
    pub fn on(&self, date: NaiveDate) -> Vec<&TimeBlock> {
        self.blocks.iter().filter(|b| b.date == date).collect()
    }

    /// Completion of the blocks on `date`.
    pub fn progress_on(&self, date: NaiveDate) -> Progress {
        let blocks = self.on(date);
        let completed = blocks.iter().filter(|b| b.completed).count();
        Progress::from_counts(completed, blocks.len())
    }
}
