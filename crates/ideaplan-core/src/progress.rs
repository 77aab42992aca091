//! Completion summary shared by the checklist and the daily schedule.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded half up to the nearest whole percent; 0 when `total` is 0.
    pub percentage: u32,
}

impl Progress {
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((completed * 200 + total) / (2 * total)) as u32
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(Progress::from_counts(1, 8).percentage, 13);
        assert_eq!(Progress::from_counts(3, 8).percentage, 38);
        assert_eq!(Progress::from_counts(1, 3).percentage, 33);
        assert_eq!(Progress::from_counts(2, 3).percentage, 67);
        assert_eq!(Progress::from_counts(4, 4).percentage, 100);
    }

    #[test]
    fn empty_is_zero_percent() {
        assert_eq!(
            Progress::from_counts(0, 0),
            Progress {
                completed: 0,
                total: 0,
                percentage: 0
            }
        );
    }
}
