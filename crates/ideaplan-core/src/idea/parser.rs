//! Idea record parser with validation.
//!
//! Parses TOML or JSON into an [`IdeaRecord`] and validates:
//! - The idea has a non-blank name.
//! - Task labels are unique.
//! - No task description is blank.
//!
//! An idea with no tasks is valid; its development work becomes buffer time.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::format::IdeaRecord;

/// Errors that can occur while reading an idea record.
#[derive(Debug, Error)]
pub enum IdeaParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("idea_name must not be empty")]
    MissingName,

    #[error("duplicate task label: {0:?}")]
    DuplicateTaskLabel(String),

    #[error("task {0:?} has an empty description")]
    BlankTask(String),
}

/// Parse and validate an idea record written as TOML.
pub fn parse_idea_toml(content: &str) -> Result<IdeaRecord, IdeaParseError> {
    let idea: IdeaRecord = toml::from_str(content)?;
    validate(&idea)?;
    Ok(idea)
}

/// Parse and validate an idea record written as JSON.
pub fn parse_idea_json(content: &str) -> Result<IdeaRecord, IdeaParseError> {
    let idea: IdeaRecord = serde_json::from_str(content)?;
    validate(&idea)?;
    Ok(idea)
}

/// Read an idea record from disk. `.json` files are parsed as JSON,
/// everything else as TOML.
pub fn load_idea(path: &Path) -> Result<IdeaRecord, IdeaParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| IdeaParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let idea = if is_json {
        parse_idea_json(&content)?
    } else {
        parse_idea_toml(&content)?
    };

    tracing::debug!(
        path = %path.display(),
        idea = %idea.idea_name,
        tasks = idea.tasks.len(),
        "loaded idea record"
    );
    Ok(idea)
}

fn validate(idea: &IdeaRecord) -> Result<(), IdeaParseError> {
    if idea.idea_name.trim().is_empty() {
        return Err(IdeaParseError::MissingName);
    }

    let mut seen = HashSet::new();
    for (label, description) in idea.tasks.iter() {
        if !seen.insert(label) {
            return Err(IdeaParseError::DuplicateTaskLabel(label.to_owned()));
        }
        if description.trim().is_empty() {
            return Err(IdeaParseError::BlankTask(label.to_owned()));
        }
    }

    Ok(())
}
