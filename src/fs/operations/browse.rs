//! Listing, existence checks and metadata lookups.

use tracing::debug;

use crate::adapter::BoxAdapter;
use crate::api::{Command, Gateway, RemoteEntry};
use crate::error::{BoxError, Result};
use crate::fs::PathCache;
use crate::fs::entry::{EntryKind, Metadata, Visibility};
use crate::fs::path::join;
use crate::fs::resolver::{self, Resolver};

impl<G: Gateway> BoxAdapter<G> {
    /// List the immediate children of a folder.
    ///
    /// Every child returned is cached, so following up with an operation on
    /// one of them needs no further listing.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(adapter: &boxfs::BoxAdapter) -> boxfs::Result<()> {
    /// for entry in adapter.list_contents("/").await? {
    ///     println!("{:>6} {}", entry.kind, entry.path);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_contents(&self, path: &str) -> Result<Vec<Metadata>> {
        let internal = self.prefix.apply(path)?;

        let mut cache = self.lock().await;
        let id = self
            .resolve(&mut cache, &internal, EntryKind::Folder)
            .await?
            .ok_or_else(|| self.not_found(&internal))?;

        let children = match resolver::list_folder(&self.gateway, &id).await {
            Ok(children) => children,
            Err(e) => {
                if e.is_not_found() {
                    cache.remove_tree(&internal);
                }
                return Err(e);
            }
        };
        cache.populate_children(&internal, &children);
        debug!(path = %internal, count = children.len(), "listed folder");

        Ok(children
            .iter()
            .filter(|child| !child.name.is_empty() && !child.name.contains('/'))
            .filter_map(|child| {
                let kind = EntryKind::from_item_type(child.item_type)?;
                let logical = self.prefix.strip(&join(&internal, &child.name));
                Some(Metadata::from_remote(logical, kind, child))
            })
            .collect())
    }

    /// Whether a file or folder exists at `path`.
    ///
    /// Checked against the service, so a cached ID that has since been
    /// deleted elsewhere reports `false` (and is evicted).
    pub async fn has(&self, path: &str) -> Result<bool> {
        let internal = self.prefix.apply(path)?;
        let mut cache = self.lock().await;
        match self.metadata_locked(&mut cache, &internal).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Fetch fresh metadata for a file or folder.
    pub async fn get_metadata(&self, path: &str) -> Result<Metadata> {
        let internal = self.prefix.apply(path)?;
        let mut cache = self.lock().await;
        self.metadata_locked(&mut cache, &internal).await
    }

    /// Size in bytes. Folders report the total size of their contents.
    pub async fn get_size(&self, path: &str) -> Result<u64> {
        self.get_metadata(path)
            .await?
            .size
            .ok_or(BoxError::InvalidResponse)
    }

    /// Last modification time as Unix seconds.
    pub async fn get_timestamp(&self, path: &str) -> Result<i64> {
        self.get_metadata(path)
            .await?
            .timestamp
            .ok_or(BoxError::InvalidResponse)
    }

    /// MIME type guessed from the file name.
    pub fn get_mimetype(&self, path: &str) -> String {
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Box has no per-item visibility; always fails.
    pub fn set_visibility(&self, _path: &str, _visibility: Visibility) -> Result<()> {
        Err(BoxError::Unsupported("visibility"))
    }

    /// Box has no per-item visibility; always fails.
    pub fn get_visibility(&self, _path: &str) -> Result<Visibility> {
        Err(BoxError::Unsupported("visibility"))
    }

    async fn metadata_locked(&self, cache: &mut PathCache, internal: &str) -> Result<Metadata> {
        let entry = Resolver::new(&self.gateway, &mut *cache)
            .resolve_entry(internal)
            .await?
            .ok_or_else(|| self.not_found(internal))?;

        let command = match entry.kind {
            EntryKind::File => Command::GetFileInfo { id: entry.id },
            EntryKind::Folder => Command::GetFolderInfo { id: entry.id },
        };
        let remote: RemoteEntry = self.call_for(cache, internal, &command).await?.json()?;

        Ok(Metadata::from_remote(
            self.prefix.strip(internal),
            entry.kind,
            &remote,
        ))
    }
}
