//! Shared test utilities for ideaplan integration tests.
//!
//! Provides sample idea records, synthetic task pools, and helpers for
//! inspecting generated phase lists.

use std::path::PathBuf;

use tempfile::TempDir;

use ideaplan_core::partition::BUFFER_TASK;
use ideaplan_core::{IdeaRecord, Phase};

/// TOML for a realistic idea record with six tasks.
pub const SAMPLE_IDEA_TOML: &str = r#"
idea_name = "Campus Event Finder"
description = "Discover and RSVP to student society events"
platform = "web"
status = "finalized"

[tasks]
"Sprint 1" = "Set up the project skeleton and CI"
"Sprint 2" = "Model events and societies"
"Sprint 3" = "Build the event listing page"
"Sprint 4" = "Add search and category filters"
"Sprint 5" = "Implement RSVP with reminders"
"Sprint 6" = "Add an admin page for society leads"
"#;

/// Parsed form of [`SAMPLE_IDEA_TOML`].
pub fn sample_idea() -> IdeaRecord {
    ideaplan_core::idea::parse_idea_toml(SAMPLE_IDEA_TOML).expect("sample idea should parse")
}

/// `n` distinct task descriptions: "Task 1" .. "Task n".
pub fn task_pool(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Task {i}")).collect()
}

/// All development phases, in order.
pub fn development_phases(phases: &[Phase]) -> Vec<&Phase> {
    phases.iter().filter(|p| p.is_development()).collect()
}

/// Concatenated development tasks with buffer placeholders removed.
pub fn placed_tasks(phases: &[Phase]) -> Vec<String> {
    development_phases(phases)
        .into_iter()
        .flat_map(|p| p.tasks.iter().cloned())
        .filter(|t| t != BUFFER_TASK)
        .collect()
}

/// Sum of allocated days across all phases. Panics if any phase is unscheduled.
pub fn allocated_days(phases: &[Phase]) -> u32 {
    phases
        .iter()
        .map(|p| p.days.expect("phase should be scheduled"))
        .sum()
}

/// A temporary directory holding an idea file.
///
/// Keep the returned [`TempDir`] alive for as long as the path is used.
pub fn write_idea_file(file_name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("failed to write idea file");
    (dir, path)
}
