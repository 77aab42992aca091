//! Calendar projection of a scheduled plan.
//!
//! Lays a plan's phases end to end from a start date. Windows are inclusive
//! on both ends, so a 3-day phase starting on the 1st ends on the 3rd. Agile
//! remainder days extend the final sprint's window.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::partition::Plan;

/// Calendar window of one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseWindow {
    pub name: String,
    pub days: u32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("phase {0:?} has no scheduled duration")]
    Unscheduled(String),

    #[error("phase {0:?} is zero days long")]
    EmptyPhase(String),

    #[error("phase {0:?} runs past the supported calendar range")]
    OutOfRange(String),
}

/// Project `plan` onto the calendar starting at `start`.
pub fn project_onto(plan: &Plan, start: NaiveDate) -> Result<Vec<PhaseWindow>, TimelineError> {
    let mut windows = Vec::with_capacity(plan.phases.len());
    let mut cursor = start;
    let last = plan.phases.len().saturating_sub(1);

    for (i, phase) in plan.phases.iter().enumerate() {
        let mut days = phase
            .days
            .ok_or_else(|| TimelineError::Unscheduled(phase.name.clone()))?;
        if days == 0 {
            return Err(TimelineError::EmptyPhase(phase.name.clone()));
        }
        if i == last {
            days += plan.remainder_days;
        }

        let out_of_range = || TimelineError::OutOfRange(phase.name.clone());
        let ends_on = cursor
            .checked_add_days(Days::new(u64::from(days - 1)))
            .ok_or_else(out_of_range)?;
        windows.push(PhaseWindow {
            name: phase.name.clone(),
            days,
            starts_on: cursor,
            ends_on,
        });
        if i < last {
            cursor = ends_on
                .checked_add_days(Days::new(1))
                .ok_or_else(out_of_range)?;
        }
    }

    Ok(windows)
}
