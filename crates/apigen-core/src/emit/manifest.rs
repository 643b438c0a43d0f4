use serde::Serialize;

use crate::profile::CategoryKind;

/// Whether a planned file reached the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Written,
    /// The file already existed and the overwrite policy kept it.
    Skipped,
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub category: CategoryKind,
    pub content: String,
    pub outcome: WriteOutcome,
}

/// The record of one generation run, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationManifest {
    entries: Vec<ManifestEntry>,
}

impl GenerationManifest {
    pub(crate) fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn written(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == WriteOutcome::Written)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == WriteOutcome::Skipped)
    }

    pub fn by_category(&self, kind: CategoryKind) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(move |e| e.category == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
