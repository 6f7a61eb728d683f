pub mod anseong;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A known tourist spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub description: String,
    #[serde(alias = "image_url")]
    pub image_ref: String,
}

impl LocationEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_ref: image_ref.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Location name must not be empty")]
    EmptyName,

    #[error("Duplicate location name: {0}")]
    DuplicateName(String),

    #[error("Failed to read {path}: {source}")]
    IO {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid knowledge file: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Ordered, read-only collection of locations.
///
/// Order is the order entries were supplied in; both the recommendation list
/// and substring matching depend on it.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<LocationEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<LocationEntry>) -> Result<Self, KnowledgeError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.name.is_empty() {
                return Err(KnowledgeError::EmptyName);
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(KnowledgeError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in Anseong data set.
    pub fn anseong() -> Self {
        Self {
            entries: anseong::spots(),
        }
    }

    /// Loads a JSON array of entries.
    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|source| KnowledgeError::IO {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<LocationEntry> = serde_json::from_str(&content)?;
        Self::new(entries)
    }

    pub fn list_all(&self) -> &[LocationEntry] {
        &self.entries
    }

    /// First entry, in insertion order, whose name occurs in `text`.
    pub fn find_by_name_substring(&self, text: &str) -> Option<&LocationEntry> {
        self.entries
            .iter()
            .find(|entry| text.contains(entry.name.as_str()))
    }

    /// Up to `n` entries from the front.
    pub fn top(&self, n: usize) -> Vec<LocationEntry> {
        self.entries.iter().take(n).cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
