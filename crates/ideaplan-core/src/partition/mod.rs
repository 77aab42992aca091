//! Duration partitioning: waterfall phases and agile sprints.
//!
//! Both strategies take an optional [`Duration`] and the idea's task pool and
//! return a fresh, ordered list of [`Phase`]s. Nothing is cached between
//! calls; identical inputs always produce identical output.

pub mod agile;
pub mod waterfall;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::Duration;

pub use agile::{SprintLayout, agile_layout, bucket_tasks};
pub use waterfall::allocate_days;

/// Placeholder task for a development phase that would otherwise be empty.
pub const BUFFER_TASK: &str = "Buffer";

/// Default upper bound on the number of agile sprints.
pub const DEFAULT_MAX_SPRINTS: u32 = 30;

/// Partitioning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Waterfall,
    Agile,
}

impl Strategy {
    /// Smallest total day count this strategy can schedule.
    pub fn minimum_days(self) -> u32 {
        match self {
            Self::Waterfall => waterfall::PHASE_COUNT,
            Self::Agile => agile::FIXED_SPRINTS + 1,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Waterfall => "waterfall",
            Self::Agile => "agile",
        };
        f.write_str(s)
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waterfall" => Ok(Self::Waterfall),
            "agile" => Ok(Self::Agile),
            other => Err(StrategyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Strategy`] string.
#[derive(Debug, Clone)]
pub struct StrategyParseError(pub String);

impl fmt::Display for StrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strategy: {:?} (expected waterfall or agile)", self.0)
    }
}

impl std::error::Error for StrategyParseError {}

// ---------------------------------------------------------------------------

/// What kind of work a phase or sprint holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Planning,
    Design,
    Development,
    Testing,
    Deployment,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planning => "planning",
            Self::Design => "design",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Deployment => "deployment",
        };
        f.write_str(s)
    }
}

/// A named, ordered unit of project work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Display name, including the duration annotation when scheduled.
    pub name: String,
    pub kind: PhaseKind,
    pub tasks: Vec<String>,
    /// Days allocated to this phase, before formatting. `None` when unscheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl Phase {
    pub fn is_development(&self) -> bool {
        self.kind == PhaseKind::Development
    }
}

/// The full result of a partitioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub strategy: Strategy,
    /// Requested duration in days, `None` when unscheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_days: Option<u32>,
    /// Agile days left over after equal-length sprints. Always 0 for waterfall.
    #[serde(default)]
    pub remainder_days: u32,
    pub phases: Vec<Phase>,
}

/// Errors that can occur while partitioning a duration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("{strategy} plans need at least {minimum} days, got {total_days}")]
    DurationTooShort {
        strategy: Strategy,
        total_days: u32,
        minimum: u32,
    },

    #[error("max sprints must be at least {minimum}, got {value}")]
    InvalidMaxSprints { value: u32, minimum: u32 },
}

// ---------------------------------------------------------------------------

/// Configurable entry point for partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    max_sprints: u32,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self {
            max_sprints: DEFAULT_MAX_SPRINTS,
        }
    }
}

impl Partitioner {
    /// Build a partitioner with a custom agile sprint cap.
    ///
    /// The cap must leave room for one development sprint besides the
    /// planning, testing and deployment sprints.
    pub fn with_max_sprints(max_sprints: u32) -> Result<Self, PartitionError> {
        let minimum = agile::FIXED_SPRINTS + 1;
        if max_sprints < minimum {
            return Err(PartitionError::InvalidMaxSprints {
                value: max_sprints,
                minimum,
            });
        }
        Ok(Self { max_sprints })
    }

    pub fn max_sprints(&self) -> u32 {
        self.max_sprints
    }

    /// Partition `duration` over `tasks` using `strategy`.
    pub fn plan(
        &self,
        duration: Option<Duration>,
        tasks: &[String],
        strategy: Strategy,
    ) -> Result<Plan, PartitionError> {
        let total_days = duration.map(|d| d.to_days());
        if let Some(total_days) = total_days {
            let minimum = strategy.minimum_days();
            if total_days < minimum {
                return Err(PartitionError::DurationTooShort {
                    strategy,
                    total_days,
                    minimum,
                });
            }
        }
        if tasks.is_empty() {
            tracing::warn!(%strategy, "task pool is empty; development work will be buffer only");
        }

        let (phases, remainder_days) = match strategy {
            Strategy::Waterfall => (waterfall::generate(total_days, tasks), 0),
            Strategy::Agile => agile::generate(total_days, tasks, self.max_sprints),
        };

        tracing::debug!(
            %strategy,
            ?total_days,
            phases = phases.len(),
            remainder_days,
            "partitioned duration"
        );

        Ok(Plan {
            strategy,
            total_days,
            remainder_days,
            phases,
        })
    }
}

/// Produce the ordered phase list for `tasks` under `strategy`.
///
/// Uses the default sprint cap of [`DEFAULT_MAX_SPRINTS`].
pub fn generate_phases(
    duration: Option<Duration>,
    tasks: &[String],
    strategy: Strategy,
) -> Result<Vec<Phase>, PartitionError> {
    Partitioner::default()
        .plan(duration, tasks, strategy)
        .map(|plan| plan.phases)
}

/// `" (<label>)"` suffix appended to scheduled phase names.
fn annotate(name: &str, days: u32) -> String {
    format!("{name} ({})", crate::duration::format_duration(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationUnit;

    fn pool(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Task {i}")).collect()
    }

    #[test]
    fn strategy_parses_and_displays() {
        assert_eq!("agile".parse::<Strategy>().unwrap(), Strategy::Agile);
        assert_eq!("waterfall".parse::<Strategy>().unwrap(), Strategy::Waterfall);
        assert_eq!(Strategy::Agile.to_string(), "agile");
        assert!("scrum".parse::<Strategy>().is_err());
    }

    #[test]
    fn rejects_waterfall_shorter_than_phase_count() {
        let err = generate_phases(Some(Duration::days(4)), &pool(2), Strategy::Waterfall)
            .unwrap_err();
        assert_eq!(
            err,
            PartitionError::DurationTooShort {
                strategy: Strategy::Waterfall,
                total_days: 4,
                minimum: 5,
            }
        );
    }

    #[test]
    fn rejects_zero_day_agile_plan() {
        let zero = Duration::new(0.0, DurationUnit::Weeks).unwrap();
        let err = generate_phases(Some(zero), &pool(2), Strategy::Agile).unwrap_err();
        assert!(matches!(
            err,
            PartitionError::DurationTooShort { minimum: 4, total_days: 0, .. }
        ));
    }

    #[test]
    fn minimum_durations_are_accepted() {
        assert!(generate_phases(Some(Duration::days(5)), &pool(3), Strategy::Waterfall).is_ok());
        assert!(generate_phases(Some(Duration::days(4)), &pool(3), Strategy::Agile).is_ok());
    }

    #[test]
    fn max_sprints_must_leave_a_development_sprint() {
        assert!(Partitioner::with_max_sprints(3).is_err());
        assert_eq!(Partitioner::with_max_sprints(4).unwrap().max_sprints(), 4);
    }

    #[test]
    fn plan_reports_total_and_remainder() {
        let plan = Partitioner::default()
            .plan(Some(Duration::days(30)), &pool(5), Strategy::Agile)
            .unwrap();
        assert_eq!(plan.total_days, Some(30));
        assert_eq!(plan.remainder_days, 6);

        let plan = Partitioner::default()
            .plan(Some(Duration::days(30)), &pool(5), Strategy::Waterfall)
            .unwrap();
        assert_eq!(plan.remainder_days, 0);
    }

    #[test]
    fn unscheduled_plan_has_no_days() {
        let plan = Partitioner::default()
            .plan(None, &pool(3), Strategy::Waterfall)
            .unwrap();
        assert_eq!(plan.total_days, None);
        assert!(plan.phases.iter().all(|p| p.days.is_none()));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let tasks = pool(9);
        for strategy in [Strategy::Waterfall, Strategy::Agile] {
            let a = generate_phases(Some(Duration::days(45)), &tasks, strategy).unwrap();
            let b = generate_phases(Some(Duration::days(45)), &tasks, strategy).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn plan_serializes_to_json() {
        let plan = Partitioner::default()
            .plan(None, &pool(1), Strategy::Waterfall)
            .unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["strategy"], "waterfall");
        assert_eq!(json["phases"][2]["kind"], "development");
        assert!(json["phases"][0].get("days").is_none());
    }
}
