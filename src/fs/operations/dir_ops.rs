//! Directory creation and deletion.

use tracing::info;

use crate::adapter::BoxAdapter;
use crate::api::{Command, Gateway, RemoteEntry};
use crate::error::{BoxError, Result};
use crate::fs::entry::{EntryKind, Metadata, PathEntry, ROOT_ID};
use crate::fs::path::{components, join, normalize_path};
use crate::fs::{PathCache, Resolver};

impl<G: Gateway> BoxAdapter<G> {
    /// Create a directory, including any missing ancestors.
    ///
    /// Idempotent: if the path already is a folder nothing is sent to the
    /// service. Fails if any component exists as a file.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(adapter: &boxfs::BoxAdapter) -> boxfs::Result<()> {
    /// adapter.create_dir("/reports/2024/q1").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_dir(&self, path: &str) -> Result<Metadata> {
        let internal = self.prefix.apply(path)?;
        let mut cache = self.lock().await;
        let (_, created) = self.ensure_folder(&mut cache, &internal).await?;

        let logical = self.prefix.strip(&internal);
        Ok(match created {
            Some(folder) => Metadata::from_remote(logical, EntryKind::Folder, &folder),
            None => Metadata::bare(logical, EntryKind::Folder),
        })
    }

    /// Delete a directory and everything in it.
    pub async fn delete_dir(&self, path: &str) -> Result<()> {
        let internal = self.prefix.apply(path)?;
        if internal == self.prefix.as_str() {
            return Err(BoxError::InvalidPath(self.prefix.strip(&internal)));
        }

        let mut cache = self.lock().await;
        let id = self
            .resolve(&mut cache, &internal, EntryKind::Folder)
            .await?
            .ok_or_else(|| self.not_found(&internal))?;

        // 204 No Content on success
        self.call_for(
            &mut cache,
            &internal,
            &Command::DeleteFolder {
                id,
                recursive: true,
            },
        )
        .await?;

        let removed = cache.remove_tree(&internal);
        info!(path = %internal, removed, "deleted folder");
        Ok(())
    }

    /// Make sure `path` is a folder, creating missing components one level
    /// at a time. Returns the folder ID and, when anything was created, the
    /// record of the last (deepest) created folder.
    pub(crate) async fn ensure_folder(
        &self,
        cache: &mut PathCache,
        path: &str,
    ) -> Result<(String, Option<RemoteEntry>)> {
        let path = normalize_path(path);
        if let Some(entry) = cache.get(&path) {
            return match entry.kind {
                EntryKind::Folder => Ok((entry.id.clone(), None)),
                EntryKind::File => Err(self.is_a_file(&path)),
            };
        }

        let mut current = PathEntry {
            path: "/".to_string(),
            id: ROOT_ID.to_string(),
            kind: EntryKind::Folder,
        };
        // Set once we create a folder: its children are known to be empty.
        let mut fresh = false;
        let mut created = None;

        for part in components(&path) {
            let child_path = join(&current.path, part);

            let existing = if fresh {
                None
            } else {
                if cache.get(&child_path).is_none()
                    && !Resolver::new(&self.gateway, &mut *cache)
                        .refresh(&current)
                        .await?
                {
                    return Err(self.not_found(&current.path));
                }
                cache.get(&child_path).cloned()
            };

            current = match existing {
                Some(entry) if entry.kind == EntryKind::Folder => entry,
                Some(_) => return Err(self.is_a_file(&child_path)),
                None => {
                    let command = Command::CreateFolder {
                        name: part.to_string(),
                        parent_id: current.id.clone(),
                    };
                    let response = self.call_for(cache, &current.path, &command).await?;
                    let folder: RemoteEntry = response.json()?;
                    info!(path = %child_path, id = %folder.id, "created folder");

                    cache.put(&child_path, folder.id.clone(), EntryKind::Folder);
                    fresh = true;
                    let entry = PathEntry {
                        path: child_path,
                        id: folder.id.clone(),
                        kind: EntryKind::Folder,
                    };
                    created = Some(folder);
                    entry
                }
            };
        }

        Ok((current.id, created))
    }

    fn is_a_file(&self, internal: &str) -> BoxError {
        BoxError::InvalidPath(format!("{} is a file", self.prefix.strip(internal)))
    }
}
