//! QA checklist tracked next to a plan.
//!
//! The default items are defined in `default_checklist.toml` and embedded in
//! the binary at compile time. Progress is kept in a local JSON file holding
//! the item list.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::progress::Progress;

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub id: String,
    /// Group heading, e.g. "Functional".
    pub category: String,
    pub label: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("no checklist item with id {0:?}")]
    UnknownItem(String),

    #[error("failed to access checklist file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("checklist file {path} is not valid: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct DefaultLibrary {
    items: Vec<QaItem>,
}

static DEFAULT_CHECKLIST_TOML: &str = include_str!("default_checklist.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    items: Vec<QaItem>,
}

impl Checklist {
    /// The built-in checklist, all items open.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which would be caught by
    /// this module's tests before release.
    pub fn default_items() -> Self {
        let lib: DefaultLibrary = toml::from_str(DEFAULT_CHECKLIST_TOML)
            .expect("embedded default_checklist.toml is invalid");
        Self { items: lib.items }
    }

    pub fn from_items(items: Vec<QaItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[QaItem] {
        &self.items
    }

    /// Load saved progress from `path`.
    ///
    /// A missing file or an empty item list yields the default checklist.
    pub fn load(path: &Path) -> Result<Self, ChecklistError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no checklist file, using defaults");
                return Ok(Self::default_items());
            }
            Err(source) => {
                return Err(ChecklistError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let items: Vec<QaItem> =
            serde_json::from_str(&content).map_err(|source| ChecklistError::Json {
                path: path.display().to_string(),
                source,
            })?;
        if items.is_empty() {
            return Ok(Self::default_items());
        }
        Ok(Self { items })
    }

    /// Write the checklist to `path` as pretty JSON, creating parent dirs.
    pub fn save(&self, path: &Path) -> Result<(), ChecklistError> {
        let io_err = |source| ChecklistError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ChecklistError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, contents).map_err(io_err)
    }

    /// Flip an item's completed flag. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ChecklistError> {
        let item = self.item_mut(id)?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    /// Set an item's note. A blank note clears it.
    pub fn set_note(&mut self, id: &str, note: &str) -> Result<(), ChecklistError> {
        let item = self.item_mut(id)?;
        item.note = if note.trim().is_empty() {
            None
        } else {
            Some(note.to_owned())
        };
        Ok(())
    }

    /// Items grouped by category, groups in order of first appearance.
    pub fn grouped(&self) -> Vec<(&str, Vec<&QaItem>)> {
        let mut groups: Vec<(&str, Vec<&QaItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(cat, _)| *cat == item.category) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.category.as_str(), vec![item])),
            }
        }
        groups
    }

    pub fn progress(&self) -> Progress {
        let completed = self.items.iter().filter(|i| i.completed).count();
        Progress::from_counts(completed, self.items.len())
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut QaItem, ChecklistError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ChecklistError::UnknownItem(id.to_owned()))
    }
}
