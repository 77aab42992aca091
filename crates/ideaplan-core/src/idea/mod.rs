//! Idea records: the finalized project idea whose tasks feed the planner.

pub mod format;
pub mod parser;

pub use format::{IdeaRecord, TaskMap};
pub use parser::{IdeaParseError, load_idea, parse_idea_json, parse_idea_toml};
