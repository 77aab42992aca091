//! On-disk format of a finalized idea record.
//!
//! Matches what the idea generator writes out: a handful of descriptive
//! fields plus a `tasks` table mapping sprint labels to task descriptions.
//!
//! ```toml
//! idea_name = "Campus Event Finder"
//! platform = "web"
//!
//! [tasks]
//! "Sprint 1" = "Set up the project skeleton"
//! "Sprint 2" = "Build the event listing page"
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A finalized project idea.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdeaRecord {
    /// Human-readable idea name.
    pub idea_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Target platform, e.g. "web" or "mobile".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Sprint label -> task description, in document order.
    #[serde(default)]
    pub tasks: TaskMap,
}

impl IdeaRecord {
    /// Task descriptions in document order: the partitioner's task pool.
    pub fn task_pool(&self) -> Vec<String> {
        self.tasks.descriptions().map(str::to_owned).collect()
    }
}

/// Ordered mapping of sprint label to task description.
///
/// Stored as a list of pairs so the document order survives deserialization
/// from both TOML tables and JSON objects. Duplicate labels are kept here and
/// rejected by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMap(Vec<(String, String)>);

impl TaskMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Does not check for duplicate labels.
    pub fn push(&mut self, label: impl Into<String>, description: impl Into<String>) {
        self.0.push((label.into(), description.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, d)| (l.as_str(), d.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, d)| d.as_str())
    }
}

impl<L: Into<String>, D: Into<String>> FromIterator<(L, D)> for TaskMap {
    fn from_iter<I: IntoIterator<Item = (L, D)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, d)| (l.into(), d.into()))
                .collect(),
        )
    }
}

impl Serialize for TaskMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, description) in &self.0 {
            map.serialize_entry(label, description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TaskMapVisitor;

        impl<'de> Visitor<'de> for TaskMapVisitor {
            type Value = TaskMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of sprint label to task description")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TaskMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, description)) = access.next_entry::<String, String>()? {
                    entries.push((label, description));
                }
                Ok(TaskMap(entries))
            }
        }

        deserializer.deserialize_map(TaskMapVisitor)
    }
}
