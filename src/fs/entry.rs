//! Filesystem entry types.

use serde::{Deserialize, Serialize};

use crate::api::response::parse_timestamp;
use crate::api::{ItemType, RemoteEntry};

/// Remote ID of the root folder ("All Files").
pub const ROOT_ID: &str = "0";

/// Kind of a remote object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Folder/directory
    Folder,
}

impl EntryKind {
    /// Map a Box item type; web links have no filesystem counterpart.
    pub fn from_item_type(item_type: ItemType) -> Option<Self> {
        match item_type {
            ItemType::File => Some(EntryKind::File),
            ItemType::Folder => Some(EntryKind::Folder),
            ItemType::Other => None,
        }
    }

    /// Lowercase name ("file" or "folder").
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cached path → remote ID mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Normalized absolute path
    pub path: String,
    /// Remote ID
    pub id: String,
    /// File or folder
    pub kind: EntryKind,
}

/// Visibility of a path. Box has no per-item equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// Metadata returned by filesystem operations.
///
/// `path` is always the caller's logical path, with any adapter prefix removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Logical path
    pub path: String,
    /// Last path component ("" for the root)
    pub basename: String,
    /// File or folder
    pub kind: EntryKind,
    /// Size in bytes, when the service reported one
    pub size: Option<u64>,
    /// Modification time (Unix epoch), when known
    pub timestamp: Option<i64>,
    /// Always public
    pub visibility: Visibility,
}

impl Metadata {
    /// Build metadata from a remote record, placed at `path`.
    pub fn from_remote(path: String, kind: EntryKind, entry: &RemoteEntry) -> Self {
        let timestamp = entry
            .modified_at
            .as_deref()
            .or(entry.created_at.as_deref())
            .and_then(parse_timestamp);
        Self {
            basename: super::path::basename(&path).to_string(),
            path,
            kind,
            size: entry.size,
            timestamp,
            visibility: Visibility::Public,
        }
    }

    /// Metadata for an entry known only from the cache.
    pub fn bare(path: String, kind: EntryKind) -> Self {
        Self {
            basename: super::path::basename(&path).to_string(),
            path,
            kind,
            size: None,
            timestamp: None,
            visibility: Visibility::Public,
        }
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}
