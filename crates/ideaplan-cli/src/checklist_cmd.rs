//! CLI handlers for `ideaplan checklist` subcommands.
//!
//! Implements:
//! - `ideaplan checklist show`            -- print items grouped by category
//! - `ideaplan checklist toggle <id>`     -- flip an item's completed flag
//! - `ideaplan checklist note <id> <text>` -- attach a note (empty text clears it)

use std::path::Path;

use anyhow::{Context, Result};

use ideaplan_core::checklist::Checklist;

use crate::ChecklistCommands;

/// Dispatch a `ChecklistCommands` variant against the state file at `state`.
pub fn run_checklist_command(command: ChecklistCommands, state: &Path) -> Result<()> {
    let mut checklist = Checklist::load(state)?;

    match command {
        ChecklistCommands::Show => {
            print!("{}", render_checklist(&checklist));
        }
        ChecklistCommands::Toggle { id } => {
            let done = checklist.toggle(&id)?;
            save(&checklist, state)?;
            println!("{id}: {}", if done { "done" } else { "open" });
        }
        ChecklistCommands::Note { id, text } => {
            checklist.set_note(&id, &text)?;
            save(&checklist, state)?;
            println!("{id}: note {}", if text.trim().is_empty() { "cleared" } else { "saved" });
        }
    }
    Ok(())
}

fn save(checklist: &Checklist, state: &Path) -> Result<()> {
    checklist
        .save(state)
        .with_context(|| format!("failed to save checklist progress to {}", state.display()))?;
    tracing::debug!(path = %state.display(), "saved checklist");
    Ok(())
}

/// Grouped checklist with a progress footer.
pub fn render_checklist(checklist: &Checklist) -> String {
    let mut out = String::new();
    for (category, items) in checklist.grouped() {
        out.push_str(category);
        out.push('\n');
        for item in items {
            let mark = if item.completed { "x" } else { " " };
            out.push_str(&format!("  [{mark}] {:<8} {}\n", item.id, item.label));
            if let Some(note) = &item.note {
                out.push_str(&format!("               note: {note}\n"));
            }
        }
        out.push('\n');
    }

    let progress = checklist.progress();
    out.push_str(&format!(
        "Progress: {}/{} ({}%)\n",
        progress.completed, progress.total, progress.percentage
    ));
    out
}
