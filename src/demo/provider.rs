//! Data the demo scene is built from: named libraries and pairwise transfer counts.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SceneError, SceneResult};

/// One library circle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    /// Unique, non-empty name shown in the label.
    pub name: String,
}

/// Directed transfer between two libraries, by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Source library.
    pub from: String,
    /// Destination library.
    pub to: String,
    /// Number of transferred items; scales the arrow width.
    pub count: u64,
}

/// Everything the demo scene is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Libraries in ring order.
    pub libraries: Vec<LibraryRecord>,
    /// Arrows between libraries. Defaults to none.
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

impl Dataset {
    /// Reject duplicate or empty names, self transfers and transfers naming unknown libraries.
    pub fn validate(&self) -> SceneResult<()> {
        let mut names = BTreeSet::new();
        for lib in &self.libraries {
            if lib.name.trim().is_empty() {
                return Err(SceneError::data("library name must be non-empty"));
            }
            if !names.insert(lib.name.as_str()) {
                return Err(SceneError::data(format!(
                    "duplicate library \"{}\"",
                    lib.name
                )));
            }
        }
        for t in &self.transfers {
            for end in [&t.from, &t.to] {
                if !names.contains(end.as_str()) {
                    return Err(SceneError::data(format!(
                        "transfer {} -> {} references unknown library \"{end}\"",
                        t.from, t.to
                    )));
                }
            }
            if t.from == t.to {
                return Err(SceneError::data(format!(
                    "transfer from \"{}\" to itself",
                    t.from
                )));
            }
        }
        Ok(())
    }

    /// Index of a library by name.
    pub fn library_index(&self, name: &str) -> Option<usize> {
        self.libraries.iter().position(|l| l.name == name)
    }

    /// Largest transfer count (0 when there are none).
    pub fn max_count(&self) -> u64 {
        self.transfers.iter().map(|t| t.count).max().unwrap_or(0)
    }
}

/// Source of the demo dataset. Failures are reported to the caller and never retried.
pub trait DataProvider {
    /// Produce a validated dataset.
    fn fetch(&mut self) -> SceneResult<Dataset>;
}

/// Reads a JSON dataset from disk.
#[derive(Clone, Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    /// Provider reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File read by [`DataProvider::fetch`].
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for JsonFileProvider {
    #[tracing::instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn fetch(&mut self) -> SceneResult<Dataset> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| SceneError::data(format!("read {}: {e}", self.path.display())))?;
        let data: Dataset = serde_json::from_str(&text).map_err(|e| {
            SceneError::data(format!("parse {}: {e}", self.path.display()))
        })?;
        data.validate()?;
        tracing::debug!(
            libraries = data.libraries.len(),
            transfers = data.transfers.len(),
            "dataset loaded"
        );
        Ok(data)
    }
}

/// Hands out a fixed dataset.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    data: Dataset,
}

impl StaticProvider {
    /// Provider returning `data` as is.
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    /// Six libraries with a few transfers between them.
    pub fn sample() -> Self {
        let names = ["core", "alloc", "std", "serde", "tokio", "rand"];
        let transfer = |from: &str, to: &str, count| Transfer {
            from: from.to_owned(),
            to: to.to_owned(),
            count,
        };
        Self::new(Dataset {
            libraries: names
                .iter()
                .map(|n| LibraryRecord {
                    name: (*n).to_owned(),
                })
                .collect(),
            transfers: vec![
                transfer("core", "alloc", 12),
                transfer("alloc", "std", 9),
                transfer("std", "serde", 4),
                transfer("std", "tokio", 7),
                transfer("rand", "core", 2),
            ],
        })
    }
}

impl DataProvider for StaticProvider {
    fn fetch(&mut self) -> SceneResult<Dataset> {
        self.data.validate()?;
        Ok(self.data.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/provider.rs"]
mod tests;
