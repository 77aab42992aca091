//! Duration units, normalization to whole days, and human-readable labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit a project duration is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
}

impl DurationUnit {
    /// Fixed day ratio for this unit (a month is always 30 days).
    pub fn days_per_unit(self) -> u32 {
        match self {
            Self::Days => 1,
            Self::Weeks => 7,
            Self::Months => 30,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        };
        f.write_str(s)
    }
}

impl FromStr for DurationUnit {
    type Err = DurationUnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            other => Err(DurationUnitParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DurationUnit`] string.
#[derive(Debug, Clone)]
pub struct DurationUnitParseError(pub String);

impl fmt::Display for DurationUnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid duration unit: {:?} (expected days, weeks, or months)",
            self.0
        )
    }
}

impl std::error::Error for DurationUnitParseError {}

// ---------------------------------------------------------------------------

/// Errors raised when a duration value cannot be scheduled.
#[derive(Debug, Error, PartialEq)]
pub enum DurationError {
    #[error("invalid duration {0}: must be a finite, non-negative number")]
    Invalid(f64),

    #[error("duration of {value} {unit} does not fit in a day count")]
    OutOfRange { value: f64, unit: DurationUnit },
}

/// A validated project duration.
///
/// Only constructible through [`Duration::new`], so a `Duration` is always
/// finite and non-negative. "No duration" is modelled as `Option::None` by
/// callers; a zero value is a real, zero-day duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Duration {
    value: f64,
    unit: DurationUnit,
}

impl Duration {
    pub fn new(value: f64, unit: DurationUnit) -> Result<Self, DurationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DurationError::Invalid(value));
        }
        let duration = Self { value, unit };
        // Reject values whose day count would overflow up front.
        duration.checked_days()?;
        Ok(duration)
    }

    /// Shorthand for a whole number of days.
    pub fn days(days: u32) -> Self {
        Self {
            value: f64::from(days),
            unit: DurationUnit::Days,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    /// Whole days in this duration, rounding fractional days half away from zero.
    pub fn to_days(&self) -> u32 {
        // Range was checked in `new`; `days()` cannot overflow.
        self.checked_days().unwrap_or(u32::MAX)
    }

    fn checked_days(&self) -> Result<u32, DurationError> {
        let days = (self.value * f64::from(self.unit.days_per_unit())).round();
        if days > f64::from(u32::MAX) {
            return Err(DurationError::OutOfRange {
                value: self.value,
                unit: self.unit,
            });
        }
        Ok(days as u32)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Validate `value` and convert it to whole days.
pub fn to_days(value: f64, unit: DurationUnit) -> Result<u32, DurationError> {
    Duration::new(value, unit).map(|d| d.to_days())
}

/// Render a day count as a short human-readable label.
///
/// 30 days and above render in months, 7 and above in weeks, anything less
/// in whole days. Months and weeks carry one decimal place unless the value
/// is whole at that precision.
///
/// ```
/// use ideaplan_core::format_duration;
///
/// assert_eq!(format_duration(3), "3 days");
/// assert_eq!(format_duration(14), "2 weeks");
/// assert_eq!(format_duration(16), "2.3 weeks");
/// assert_eq!(format_duration(45), "1.5 months");
/// ```
pub fn format_duration(days: u32) -> String {
    let (per_unit, singular, plural) = if days >= 30 {
        (30, "month", "months")
    } else if days >= 7 {
        (7, "week", "weeks")
    } else {
        return if days == 1 {
            "1 day".to_owned()
        } else {
            format!("{days} days")
        };
    };

    // Tenths of a unit, rounded half up, in integer arithmetic.
    let tenths = (u64::from(days) * 20 + per_unit) / (2 * per_unit);
    let label = if tenths == 10 { singular } else { plural };
    if tenths % 10 == 0 {
        format!("{} {label}", tenths / 10)
    } else {
        format!("{}.{} {label}", tenths / 10, tenths % 10)
    }
}
