//! Variable-length agile sprint plan.
//!
//! Sprint 1 is always planning and the last two sprints are always testing
//! and deployment. Everything in between is a development sprint carrying a
//! contiguous chunk of the task pool.

use serde::Serialize;

use super::{BUFFER_TASK, Phase, PhaseKind, annotate};

/// Planning, testing and deployment sprints, each reserving at least one day.
pub(super) const FIXED_SPRINTS: u32 = 3;

/// Sprint count used when no duration is given.
const UNSCHEDULED_SPRINTS: u32 = 10;

/// Shape of an agile plan before tasks are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SprintLayout {
    pub sprint_count: u32,
    pub dev_sprints: u32,
    /// Days per sprint. `None` when unscheduled.
    pub sprint_length: Option<u32>,
    /// Days left after `sprint_count` equal sprints.
    pub remainder: u32,
}

/// Solve the sprint count and length for a plan.
///
/// With a duration: one development sprint per task, limited by the days
/// left after the three fixed sprints and by `max_sprints`. Without one the
/// plan has a fixed ten sprints (or `max_sprints`, if lower).
///
/// A `max_sprints` below 4 is raised to 4: one development sprint plus the
/// three fixed ones. [`Partitioner`](super::Partitioner) rejects such caps
/// before getting here.
pub fn agile_layout(
    total_days: Option<u32>,
    task_count: usize,
    max_sprints: u32,
) -> SprintLayout {
    let max_sprints = max_sprints.max(FIXED_SPRINTS + 1);
    let Some(total_days) = total_days else {
        let sprint_count = UNSCHEDULED_SPRINTS.min(max_sprints);
        return SprintLayout {
            sprint_count,
            dev_sprints: sprint_count - FIXED_SPRINTS,
            sprint_length: None,
            remainder: 0,
        };
    };

    let task_count = u32::try_from(task_count).unwrap_or(u32::MAX);
    let mut dev_sprints = task_count
        .min(total_days.saturating_sub(FIXED_SPRINTS))
        .max(1);
    let mut sprint_count = dev_sprints + FIXED_SPRINTS;
    if sprint_count > max_sprints {
        dev_sprints = max_sprints - FIXED_SPRINTS;
        sprint_count = max_sprints;
    }

    let sprint_length = total_days / sprint_count;
    SprintLayout {
        sprint_count,
        dev_sprints,
        sprint_length: Some(sprint_length),
        remainder: total_days - sprint_length * sprint_count,
    }
}

/// Split `tasks` into `slots` contiguous chunks of `ceil(len / slots)` tasks.
///
/// Trailing slots that run past the end of the pool get [`BUFFER_TASK`].
pub fn bucket_tasks(tasks: &[String], slots: u32) -> Vec<Vec<String>> {
    let slots = slots.max(1) as usize;
    let chunk = tasks.len().div_ceil(slots);

    (0..slots)
        .map(|idx| {
            let start = (idx * chunk).min(tasks.len());
            let end = (start + chunk).min(tasks.len());
            if start == end {
                vec![BUFFER_TASK.to_owned()]
            } else {
                tasks[start..end].to_vec()
            }
        })
        .collect()
}

/// Returns the sprints and the unallocated remainder in days.
pub(super) fn generate(
    total_days: Option<u32>,
    tasks: &[String],
    max_sprints: u32,
) -> (Vec<Phase>, u32) {
    let layout = agile_layout(total_days, tasks.len(), max_sprints);
    tracing::debug!(?layout, "solved agile sprint layout");

    let mut buckets = bucket_tasks(tasks, layout.dev_sprints).into_iter();
    let last = layout.sprint_count - 1;

    let sprints = (0..layout.sprint_count)
        .map(|i| {
            let (label, kind, tasks) = if i == 0 {
                (
                    "Planning",
                    PhaseKind::Planning,
                    fixed(&["Plan backlog, define priorities"]),
                )
            } else if i == last - 1 {
                (
                    "Testing",
                    PhaseKind::Testing,
                    fixed(&["Test implemented features", "Fix bugs"]),
                )
            } else if i == last {
                (
                    "Finalization & Deployment",
                    PhaseKind::Deployment,
                    fixed(&["Finalize app", "Deploy to production"]),
                )
            } else {
                let tasks = buckets
                    .next()
                    .unwrap_or_else(|| vec![BUFFER_TASK.to_owned()]);
                ("Development", PhaseKind::Development, tasks)
            };

            let base = format!("Sprint {} - {label}", i + 1);
            let mut name = match layout.sprint_length {
                Some(len) => annotate(&base, len),
                None => base,
            };
            if i == last && layout.remainder > 0 {
                name = format!(
                    "{name} (+{})",
                    crate::duration::format_duration(layout.remainder)
                );
            }

            Phase {
                name,
                kind,
                tasks,
                days: layout.sprint_length,
            }
        })
        .collect();

    (sprints, layout.remainder)
}

fn fixed(tasks: &[&str]) -> Vec<String> {
    tasks.iter().map(|t| (*t).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Task {i}")).collect()
    }

    #[test]
    fn thirty_days_five_tasks() {
        let layout = agile_layout(Some(30), 5, 30);
        assert_eq!(
            layout,
            SprintLayout {
                sprint_count: 8,
                dev_sprints: 5,
                sprint_length: Some(3),
                remainder: 6,
            }
        );
    }

    #[test]
    fn short_duration_limits_dev_sprints() {
        // 10 tasks but only 6 days: 3 development sprints fit.
        let layout = agile_layout(Some(6), 10, 30);
        assert_eq!(layout.dev_sprints, 3);
        assert_eq!(layout.sprint_count, 6);
        assert_eq!(layout.sprint_length, Some(1));
        assert_eq!(layout.remainder, 0);
    }

    #[test]
    fn sprint_count_clamps_to_max() {
        let layout = agile_layout(Some(365), 100, 30);
        assert_eq!(layout.sprint_count, 30);
        assert_eq!(layout.dev_sprints, 27);
        assert_eq!(layout.sprint_length, Some(12));
        assert_eq!(layout.remainder, 5);
    }

    #[test]
    fn no_tasks_still_gets_one_dev_sprint() {
        let layout = agile_layout(Some(20), 0, 30);
        assert_eq!(layout.dev_sprints, 1);
        assert_eq!(layout.sprint_count, 4);
        assert_eq!(layout.sprint_length, Some(5));
    }

    #[test]
    fn unscheduled_layout_is_fixed_at_ten() {
        let layout = agile_layout(None, 0, 30);
        assert_eq!(layout.sprint_count, 10);
        assert_eq!(layout.dev_sprints, 7);
        assert_eq!(layout.sprint_length, None);
        assert_eq!(layout.remainder, 0);
    }

    #[test]
    fn unscheduled_layout_respects_lower_cap() {
        let layout = agile_layout(None, 3, 6);
        assert_eq!(layout.sprint_count, 6);
        assert_eq!(layout.dev_sprints, 3);
    }

    #[test]
    fn cap_below_fixed_sprints_is_raised() {
        let unscheduled = agile_layout(None, 0, 2);
        assert_eq!(unscheduled.sprint_count, 4);
        assert_eq!(unscheduled.dev_sprints, 1);

        let scheduled = agile_layout(Some(40), 9, 0);
        assert_eq!(scheduled.sprint_count, 4);
        assert_eq!(scheduled.dev_sprints, 1);
        assert_eq!(scheduled.sprint_length, Some(10));
    }

    #[test]
    fn layout_accounts_for_every_day() {
        for total in 4..=400 {
            for tasks in [0, 1, 3, 12, 50] {
                let layout = agile_layout(Some(total), tasks, 30);
                let len = layout.sprint_length.unwrap();
                assert_eq!(len * layout.sprint_count + layout.remainder, total);
                assert!(layout.sprint_count <= 30);
                assert!(len >= 1, "total {total} tasks {tasks}");
            }
        }
    }

    #[test]
    fn bucket_tasks_splits_contiguously() {
        let buckets = bucket_tasks(&pool(5), 3);
        assert_eq!(
            buckets,
            vec![
                vec!["Task 1", "Task 2"],
                vec!["Task 3", "Task 4"],
                vec!["Task 5"],
            ]
        );
    }

    #[test]
    fn bucket_tasks_pads_with_buffer() {
        let buckets = bucket_tasks(&pool(2), 4);
        assert_eq!(buckets[0], ["Task 1"]);
        assert_eq!(buckets[1], ["Task 2"]);
        assert_eq!(buckets[2], [BUFFER_TASK]);
        assert_eq!(buckets[3], [BUFFER_TASK]);
    }

    #[test]
    fn bucket_tasks_on_empty_pool() {
        let buckets = bucket_tasks(&[], 3);
        assert!(buckets.iter().all(|b| b == &[BUFFER_TASK]));
    }

    #[test]
    fn sprint_names_and_remainder_suffix() {
        let (sprints, remainder) = generate(Some(30), &pool(5), 30);
        assert_eq!(remainder, 6);
        assert_eq!(sprints.len(), 8);
        assert_eq!(sprints[0].name, "Sprint 1 - Planning (3 days)");
        assert_eq!(sprints[1].name, "Sprint 2 - Development (3 days)");
        assert_eq!(sprints[1].tasks, ["Task 1"]);
        assert_eq!(sprints[5].tasks, ["Task 5"]);
        assert_eq!(sprints[6].name, "Sprint 7 - Testing (3 days)");
        assert_eq!(
            sprints[7].name,
            "Sprint 8 - Finalization & Deployment (3 days) (+6 days)"
        );
    }

    #[test]
    fn no_remainder_means_no_suffix() {
        let (sprints, remainder) = generate(Some(28), &pool(4), 30);
        assert_eq!(remainder, 0);
        assert_eq!(
            sprints.last().unwrap().name,
            "Sprint 7 - Finalization & Deployment (4 days)"
        );
    }

    #[test]
    fn unscheduled_with_no_tasks_is_all_buffer() {
        let (sprints, _) = generate(None, &[], 30);
        assert_eq!(sprints.len(), 10);
        let dev: Vec<&Phase> = sprints.iter().filter(|s| s.is_development()).collect();
        assert_eq!(dev.len(), 7);
        assert!(dev.iter().all(|s| s.tasks == [BUFFER_TASK]));
        assert_eq!(sprints[0].name, "Sprint 1 - Planning");
        assert_eq!(sprints[9].name, "Sprint 10 - Finalization & Deployment");
    }

    #[test]
    fn unscheduled_keeps_every_task_for_large_pools() {
        let tasks = pool(12);
        let (sprints, _) = generate(None, &tasks, 30);
        let placed: Vec<String> = sprints
            .iter()
            .filter(|s| s.is_development())
            .flat_map(|s| s.tasks.iter().cloned())
            .filter(|t| t != BUFFER_TASK)
            .collect();
        assert_eq!(placed, tasks);
    }
}
