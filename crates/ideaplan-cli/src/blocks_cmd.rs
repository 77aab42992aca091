//! CLI handlers for `ideaplan blocks` subcommands.
//!
//! Implements:
//! - `ideaplan blocks add <title> --start HH:MM --end HH:MM` -- schedule a block
//! - `ideaplan blocks toggle <id>`  -- flip a block's completed flag
//! - `ideaplan blocks rm <id>`      -- delete a block
//! - `ideaplan blocks show`         -- print one day's blocks and progress

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ideaplan_core::schedule::{NewBlock, Schedule};

use crate::BlockCommands;

/// Dispatch a `BlockCommands` variant against the state file at `state`.
///
/// `today` is used when a command takes `--date` and none was given.
pub fn run_blocks_command(command: BlockCommands, state: &Path, today: NaiveDate) -> Result<()> {
    let mut schedule = Schedule::load(state)?;

    match command {
        BlockCommands::Add {
            title,
            start,
            end,
            date,
            category,
            description,
        } => {
            let date = date.unwrap_or(today);
            let id = schedule.add(NewBlock {
                title,
                date,
                starts_at: start,
                ends_at: end,
                category,
                description,
            })?;
            save(&schedule, state)?;
            println!("Added block {id} on {date}");
        }
        BlockCommands::Toggle { id } => {
            let done = schedule.toggle(id)?;
            save(&schedule, state)?;
            println!("{id}: {}", if done { "done" } else { "open" });
        }
        BlockCommands::Rm { id } => {
            let removed = schedule.remove(id)?;
            save(&schedule, state)?;
            println!("Removed block {id} ({})", removed.title);
        }
        BlockCommands::Show { date } => {
            print!("{}", render_day(&schedule, date.unwrap_or(today)));
        }
    }
    Ok(())
}

fn save(schedule: &Schedule, state: &Path) -> Result<()> {
    schedule
        .save(state)
        .with_context(|| format!("failed to save time blocks to {}", state.display()))?;
    tracing::debug!(path = %state.display(), "saved schedule");
    Ok(())
}

/// One day's blocks with a progress footer.
pub fn render_day(schedule: &Schedule, date: NaiveDate) -> String {
    let mut out = format!("Schedule for {date}\n");
    let blocks = schedule.on(date);
    if blocks.is_empty() {
        out.push_str("  (no time blocks)\n");
    }
    for block in blocks {
        let mark = if block.completed { "x" } else { " " };
        out.push_str(&format!(
            "  [{mark}] {:>3}  {}-{}  {:<8} {}\n",
            block.id,
            block.starts_at.format("%H:%M"),
            block.ends_at.format("%H:%M"),
            block.category.to_string(),
            block.title
        ));
        if let Some(description) = &block.description {
            out.push_str(&format!("                         {description}\n"));
        }
    }

    let progress = schedule.progress_on(date);
    out.push_str(&format!(
        "\nProgress: {}/{} ({}%)\n",
        progress.completed, progress.total, progress.percentage
    ));
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use ideaplan_core::schedule::BlockCategory;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn add(
        title: &str,
        date: Option<NaiveDate>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> BlockCommands {
        BlockCommands::Add {
            title: title.to_owned(),
            start,
            end,
            date,
            category: BlockCategory::Study,
            description: None,
        }
    }

    #[test]
    fn add_defaults_to_today_and_persists() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state = tmp.path().join("blocks.json");

        run_blocks_command(add("Read chapter 3", None, time(9, 0), time(10, 0)), &state, day(6))
            .unwrap();
        run_blocks_command(
            add("Lab report", Some(day(7)), time(13, 0), time(15, 30)),
            &state,
            day(6),
        )
        .unwrap();

        let saved = Schedule::load(&state).unwrap();
        assert_eq!(saved.on(day(6)).len(), 1);
        assert_eq!(saved.on(day(7))[0].title, "Lab report");
    }

    #[test]
    fn invalid_block_is_not_saved() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state = tmp.path().join("blocks.json");

        let err = run_blocks_command(add("Late", None, time(18, 0), time(17, 0)), &state, day(6))
            .unwrap_err();
        assert!(err.to_string().contains("must end after it starts"), "got: {err:#}");
        assert!(!state.exists());
    }

    #[test]
    fn toggle_and_rm_update_state() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state = tmp.path().join("blocks.json");
        run_blocks_command(add("A", None, time(8, 0), time(9, 0)), &state, day(6)).unwrap();
        run_blocks_command(add("B", None, time(9, 0), time(10, 0)), &state, day(6)).unwrap();

        run_blocks_command(BlockCommands::Toggle { id: 2 }, &state, day(6)).unwrap();
        run_blocks_command(BlockCommands::Rm { id: 1 }, &state, day(6)).unwrap();

        let saved = Schedule::load(&state).unwrap();
        assert_eq!(saved.blocks().len(), 1);
        assert!(saved.blocks()[0].completed);

        let err = run_blocks_command(BlockCommands::Rm { id: 9 }, &state, day(6)).unwrap_err();
        assert!(err.to_string().contains("no time block with id 9"));
    }

    #[test]
    fn render_lists_one_day() {
        let mut schedule = Schedule::default();
        let id = schedule
            .add(NewBlock {
                title: "Team sync".to_owned(),
                date: day(6),
                starts_at: time(9, 30),
                ends_at: time(10, 0),
                category: BlockCategory::Meeting,
                description: Some("sprint 2 demo".to_owned()),
            })
            .unwrap();
        schedule.toggle(id).unwrap();
        schedule
            .add(NewBlock {
                title: "Elsewhere".to_owned(),
                date: day(8),
                starts_at: time(9, 0),
                ends_at: time(10, 0),
                category: BlockCategory::Work,
                description: None,
            })
            .unwrap();

        let text = render_day(&schedule, day(6));
        assert!(text.starts_with("Schedule for 2026-04-06\n"), "got: {text}");
        assert!(text.contains("  [x]   1  09:30-10:00  meeting  Team sync\n"), "got: {text}");
        assert!(text.contains("sprint 2 demo"));
        assert!(!text.contains("Elsewhere"));
        assert!(text.ends_with("Progress: 1/1 (100%)\n"));
    }

    #[test]
    fn render_empty_day() {
        let text = render_day(&Schedule::default(), day(1));
        assert!(text.contains("(no time blocks)"));
        assert!(text.ends_with("Progress: 0/0 (0%)\n"));
    }
}
