//! Fixed five-phase waterfall plan with proportional day weights.

use super::{BUFFER_TASK, Phase, PhaseKind, annotate};

pub(super) const PHASE_COUNT: u32 = 5;

/// Index of the Development phase, which absorbs the rounding residual.
const DEVELOPMENT: usize = 2;

/// Percentage of the total duration given to each phase, in order.
const WEIGHTS_PERCENT: [u64; 5] = [10, 15, 45, 20, 10];

struct Template {
    name: &'static str,
    kind: PhaseKind,
    tasks: &'static [&'static str],
}

const TEMPLATES: [Template; 5] = [
    Template {
        name: "Planning Phase",
        kind: PhaseKind::Planning,
        tasks: &["Requirement gathering", "Feasibility study"],
    },
    Template {
        name: "Design Phase",
        kind: PhaseKind::Design,
        tasks: &["System & UI design mockups"],
    },
    Template {
        name: "Development Phase",
        kind: PhaseKind::Development,
        tasks: &[],
    },
    Template {
        name: "Testing Phase",
        kind: PhaseKind::Testing,
        tasks: &["Functional testing", "Bug fixing"],
    },
    Template {
        name: "Deployment Phase",
        kind: PhaseKind::Deployment,
        tasks: &["Release to production", "Post-deployment checks"],
    },
];

/// Split `total_days` across the five phases.
///
/// Each share is rounded half up with a floor of one day, then the residual
/// is folded into Development so the allocations sum to `total_days`
/// exactly. Requires `total_days >= 5`, which keeps Development at one day
/// or more.
pub fn allocate_days(total_days: u32) -> [u32; 5] {
    let total = u64::from(total_days);
    let mut days = WEIGHTS_PERCENT.map(|w| ((total * w + 50) / 100).max(1));

    let allocated: u64 = days.iter().sum();
    // The other four shares are bounded by ~55% of the total plus the
    // one-day floors, so Development never drops below one day here.
    days[DEVELOPMENT] = (days[DEVELOPMENT] + total).saturating_sub(allocated);

    days.map(|d| u32::try_from(d).unwrap_or(u32::MAX))
}

pub(super) fn generate(total_days: Option<u32>, tasks: &[String]) -> Vec<Phase> {
    let allocation = total_days.map(allocate_days);

    TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let tasks = match template.kind {
                PhaseKind::Development if tasks.is_empty() => vec![BUFFER_TASK.to_owned()],
                PhaseKind::Development => tasks.to_vec(),
                _ => template.tasks.iter().map(|t| (*t).to_owned()).collect(),
            };
            let days = allocation.map(|a| a[i]);
            let name = match days {
                Some(d) => annotate(template.name, d),
                None => template.name.to_owned(),
            };
            Phase {
                name,
                kind: template.kind,
                tasks,
                days,
            }
        })
        .collect()
}
