//! Core planning logic for ideaplan.
//!
//! - [`duration`]: duration units, day normalization and the canonical formatter.
//! - [`partition`]: splits a duration and a task pool into waterfall phases or
//!   agile sprints.
//! - [`idea`]: reads finalized idea records (TOML or JSON).
//! - [`timeline`]: projects a scheduled plan onto calendar dates.
//! - [`checklist`]: the QA checklist that accompanies a plan.
//! - [`schedule`]: daily time blocks with per-date progress.

pub mod checklist;
pub mod duration;
pub mod idea;
pub mod partition;
pub mod progress;
pub mod schedule;
pub mod timeline;

pub use duration::{Duration, DurationError, DurationUnit, format_duration, to_days};
pub use idea::{IdeaRecord, load_idea};
pub use partition::{
    PartitionError, Partitioner, Phase, PhaseKind, Plan, Strategy, generate_phases,
};
pub use progress::Progress;
