//! Path → remote ID cache.
//!
//! The cache only ever holds what the service told us (listings, creation
//! results) or what a successful mutation implies. It starts with the root
//! and lives as long as the adapter that owns it.

use std::collections::HashMap;

use tracing::trace;

use super::entry::{EntryKind, PathEntry, ROOT_ID};
use super::path::{is_within, join, normalize_path};
use crate::api::RemoteEntry;

/// In-memory map from normalized path to remote ID and kind.
#[derive(Debug, Clone)]
pub struct PathCache {
    entries: HashMap<String, PathEntry>,
}

impl PathCache {
    /// A cache holding only the root folder.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert("/".to_string(), root_entry());
        Self { entries }
    }

    /// Look up a path without touching the network.
    pub fn get(&self, path: &str) -> Option<&PathEntry> {
        self.entries.get(&normalize_path(path))
    }

    /// Insert or overwrite an entry. The root mapping cannot be replaced.
    pub fn put(&mut self, path: &str, id: impl Into<String>, kind: EntryKind) {
        let path = normalize_path(path);
        if path == "/" {
            return;
        }
        let id = id.into();
        trace!(%path, %id, %kind, "cache put");
        self.entries
            .insert(path.clone(), PathEntry { path, id, kind });
    }

    /// Drop one entry. The root is never evicted.
    pub fn remove(&mut self, path: &str) -> Option<PathEntry> {
        let path = normalize_path(path);
        if path == "/" {
            return None;
        }
        trace!(%path, "cache remove");
        self.entries.remove(&path)
    }

    /// Drop an entry and everything below it. Returns the number removed.
    pub fn remove_tree(&mut self, path: &str) -> usize {
        let path = normalize_path(path);
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key == "/" || !is_within(key, &path));
        let removed = before - self.entries.len();
        trace!(%path, removed, "cache remove tree");
        removed
    }

    /// Record a folder listing: one entry per child at `parent_path/name`.
    /// Children of unknown type (web links) are skipped.
    pub fn populate_children(&mut self, parent_path: &str, children: &[RemoteEntry]) {
        let parent_path = normalize_path(parent_path);
        for child in children {
            if child.name.is_empty() || child.name.contains('/') {
                continue;
            }
            if let Some(kind) = EntryKind::from_item_type(child.item_type) {
                self.put(&join(&parent_path, &child.name), child.id.clone(), kind);
            }
        }
    }

    /// Forget everything except the root.
    pub fn clear(&mut self) {
        self.entries.retain(|key, _| key == "/");
    }

    /// Number of cached entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}

fn root_entry() -> PathEntry {
    PathEntry {
        path: "/".to_string(),
        id: ROOT_ID.to_string(),
        kind: EntryKind::Folder,
    }
}
