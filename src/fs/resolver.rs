//! Path → remote ID resolution.
//!
//! Box only addresses objects by ID, and the only way to discover an ID
//! from a name is to list the parent folder. Resolution walks the path from
//! the root, reusing cached segments and listing a folder only when the next
//! segment below it is unknown. Remote calls are therefore bounded by the
//! number of uncached levels, not by the size of the tree.

use tracing::debug;

use super::cache::PathCache;
use super::entry::{EntryKind, PathEntry};
use super::path::{components, join, normalize_path};
use crate::api::{Command, Gateway, ItemCollection, RemoteEntry};
use crate::error::Result;

/// Page size requested when listing folders (the Box maximum).
pub const LIST_PAGE_LIMIT: u64 = 1000;

/// Resolves paths against one gateway and one cache.
pub struct Resolver<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
    cache: &'a mut PathCache,
}

impl<'a, G: Gateway + ?Sized> Resolver<'a, G> {
    pub fn new(gateway: &'a G, cache: &'a mut PathCache) -> Self {
        Self { gateway, cache }
    }

    /// Resolve `path` to the ID of an entry of `kind`.
    ///
    /// `Ok(None)` means not found, including when the path exists with the
    /// other kind or runs through a file. `Err` is reserved for transport and
    /// non-404 API failures.
    pub async fn resolve(&mut self, path: &str, kind: EntryKind) -> Result<Option<String>> {
        let path = normalize_path(path);

        if let Some(entry) = self.cache.get(&path) {
            return Ok((entry.kind == kind).then(|| entry.id.clone()));
        }

        Ok(self
            .resolve_entry(&path)
            .await?
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.id))
    }

    /// Resolve `path` to its cached entry, listing uncached levels.
    pub async fn resolve_entry(&mut self, path: &str) -> Result<Option<PathEntry>> {
        let path = normalize_path(path);
        let mut current = match self.cache.get("/") {
            Some(root) => root.clone(),
            None => return Ok(None),
        };

        for part in components(&path) {
            if current.kind != EntryKind::Folder {
                return Ok(None);
            }
            let r_path = join(&current.path, part);
            if self.cache.get(&r_path).is_none() && !self.refresh(&current).await? {
                return Ok(None);
            }
            match self.cache.get(&r_path) {
                Some(entry) => current = entry.clone(),
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }

    /// List `folder` and fold its children into the cache.
    ///
    /// Returns `false` (after evicting the folder) when the service no longer
    /// knows the folder's ID.
    pub async fn refresh(&mut self, folder: &PathEntry) -> Result<bool> {
        match list_folder(self.gateway, &folder.id).await {
            Ok(children) => {
                self.cache.populate_children(&folder.path, &children);
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %folder.path, id = %folder.id, "cached folder vanished remotely");
                self.cache.remove_tree(&folder.path);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Fetch every child of a folder, following pagination.
pub async fn list_folder<G: Gateway + ?Sized>(gateway: &G, id: &str) -> Result<Vec<RemoteEntry>> {
    let mut children = Vec::new();
    let mut offset = 0u64;

    loop {
        let command = Command::ListFolder {
            id: id.to_string(),
            offset,
            limit: LIST_PAGE_LIMIT,
        };
        debug!(%id, offset, "listing folder");
        let page: ItemCollection = gateway.execute(&command).await?.into_result()?.json()?;

        let page_len = page.entries.len() as u64;
        let total = page.total_count;
        children.extend(page.entries);
        offset += page_len;

        match total {
            Some(total) if page_len > 0 && offset < total => continue,
            _ => break,
        }
    }

    Ok(children)
}
