//! File rename, copy and delete.

use tracing::debug;

use crate::adapter::BoxAdapter;
use crate::api::{Command, Gateway, RemoteEntry};
use crate::error::{BoxError, Result};
use crate::fs::entry::{EntryKind, Metadata};
use crate::fs::path::{basename, dirname, join};

impl<G: Gateway> BoxAdapter<G> {
    /// Rename or move a file.
    ///
    /// The destination's parent folder must exist. When it is the file's
    /// current parent only the name is updated; otherwise name and parent
    /// change in a single request.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(adapter: &boxfs::BoxAdapter) -> boxfs::Result<()> {
    /// adapter.rename("/inbox/scan.pdf", "/archive/2024-scan.pdf").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn rename(&self, path: &str, new_path: &str) -> Result<Metadata> {
        let from = self.prefix.apply(path)?;
        let to = self.prefix.apply(new_path)?;
        let new_name = basename(&to);
        if new_name.is_empty() || to == self.prefix.as_str() {
            return Err(BoxError::InvalidPath(self.prefix.strip(&to)));
        }

        let mut cache = self.lock().await;
        let id = self
            .resolve(&mut cache, &from, EntryKind::File)
            .await?
            .ok_or_else(|| self.not_found(&from))?;
        let new_parent_id = self
            .resolve(&mut cache, dirname(&to), EntryKind::Folder)
            .await?
            .ok_or_else(|| self.not_found(dirname(&to)))?;
        // Already cached: resolving `from` cached its parent.
        let old_parent_id = self
            .resolve(&mut cache, dirname(&from), EntryKind::Folder)
            .await?;

        let parent_id = (old_parent_id.as_deref() != Some(new_parent_id.as_str()))
            .then_some(new_parent_id);
        debug!(from = %from, to = %to, moving = parent_id.is_some(), "renaming file");

        let command = Command::UpdateFileInfo {
            id,
            name: Some(new_name.to_string()),
            parent_id,
        };
        let file: RemoteEntry = self
            .call_for_all(&mut cache, &[from.as_str(), dirname(&to)], &command)
            .await?
            .json()?;

        cache.remove(&from);
        cache.put(&to, file.id.clone(), EntryKind::File);
        Ok(Metadata::from_remote(
            self.prefix.strip(&to),
            EntryKind::File,
            &file,
        ))
    }

    /// Copy a file.
    ///
    /// `new_path` is first tried as an existing folder (the copy keeps its
    /// name and lands inside it), then as a parent folder plus a new name.
    pub async fn copy(&self, path: &str, new_path: &str) -> Result<Metadata> {
        let from = self.prefix.apply(path)?;
        let to = self.prefix.apply(new_path)?;

        let mut cache = self.lock().await;
        let id = self
            .resolve(&mut cache, &from, EntryKind::File)
            .await?
            .ok_or_else(|| self.not_found(&from))?;

        let (parent_id, parent_path, name) =
            if let Some(folder_id) = self.resolve(&mut cache, &to, EntryKind::Folder).await? {
                (folder_id, to.as_str(), None)
            } else if let Some(parent_id) = self
                .resolve(&mut cache, dirname(&to), EntryKind::Folder)
                .await?
            {
                (parent_id, dirname(&to), Some(basename(&to).to_string()))
            } else {
                return Err(self.not_found(&to));
            };
        let target = join(parent_path, name.as_deref().unwrap_or(basename(&from)));
        debug!(from = %from, to = %target, renamed = name.is_some(), "copying file");

        let command = Command::CopyFile {
            id,
            parent_id,
            name,
        };
        let file: RemoteEntry = self
            .call_for_all(&mut cache, &[from.as_str(), parent_path], &command)
            .await?
            .json()?;

        cache.put(&target, file.id.clone(), EntryKind::File);
        Ok(Metadata::from_remote(
            self.prefix.strip(&target),
            EntryKind::File,
            &file,
        ))
    }

    /// Delete a file.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let internal = self.prefix.apply(path)?;

        let mut cache = self.lock().await;
        let id = self
            .resolve(&mut cache, &internal, EntryKind::File)
            .await?
            .ok_or_else(|| self.not_found(&internal))?;

        // Box answers 204 with no body; any non-failure response is success.
        self.call_for(&mut cache, &internal, &Command::DeleteFile { id })
            .await?;

        cache.remove(&internal);
        Ok(())
    }
}
