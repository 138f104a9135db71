//! Writing file contents.

use tracing::debug;

use crate::adapter::BoxAdapter;
use crate::api::{Command, Gateway, ItemCollection};
use crate::error::{BoxError, Result};
use crate::fs::PathCache;
use crate::fs::entry::{EntryKind, Metadata};
use crate::fs::path::{basename, dirname};

impl<G: Gateway> BoxAdapter<G> {
    /// Upload a new file, creating missing parent folders.
    ///
    /// Fails if a file with the same name already exists; use
    /// [`BoxAdapter::update`] to replace contents.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(adapter: &boxfs::BoxAdapter) -> boxfs::Result<()> {
    /// let meta = adapter.write("/notes/today.txt", b"hello").await?;
    /// println!("{} bytes", meta.size.unwrap_or(0));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn write(&self, path: &str, contents: &[u8]) -> Result<Metadata> {
        let internal = self.prefix.apply(path)?;
        let mut cache = self.lock().await;
        self.write_locked(&mut cache, &internal, contents).await
    }

    /// Upload a new version of a file, or create it if it does not exist.
    pub async fn update(&self, path: &str, contents: &[u8]) -> Result<Metadata> {
        let internal = self.prefix.apply(path)?;
        let mut cache = self.lock().await;

        if let Some(id) = self.resolve(&mut cache, &internal, EntryKind::File).await? {
            let command = Command::UploadNewFileVersion {
                id,
                contents: contents.to_vec(),
            };
            match self.call_for(&mut cache, &internal, &command).await {
                Ok(response) => {
                    let file = response.json::<ItemCollection>()?.into_first()?;
                    cache.put(&internal, file.id.clone(), EntryKind::File);
                    return Ok(Metadata::from_remote(
                        self.prefix.strip(&internal),
                        EntryKind::File,
                        &file,
                    ));
                }
                Err(e) if e.is_not_found() => {
                    debug!(path = %internal, "file vanished, uploading as new");
                }
                Err(e) => return Err(e),
            }
        }

        self.write_locked(&mut cache, &internal, contents).await
    }

    async fn write_locked(
        &self,
        cache: &mut PathCache,
        internal: &str,
        contents: &[u8],
    ) -> Result<Metadata> {
        let name = basename(internal);
        if name.is_empty() || internal == self.prefix.as_str() {
            return Err(BoxError::InvalidPath(self.prefix.strip(internal)));
        }

        let parent = dirname(internal);
        let (parent_id, _) = self.ensure_folder(cache, parent).await?;
        let command = Command::UploadFile {
            name: name.to_string(),
            parent_id,
            contents: contents.to_vec(),
        };
        let file = self
            .call_for(cache, parent, &command)
            .await?
            .json::<ItemCollection>()?
            .into_first()?;
        debug!(path = %internal, id = %file.id, size = contents.len(), "uploaded file");

        cache.put(internal, file.id.clone(), EntryKind::File);
        Ok(Metadata::from_remote(
            self.prefix.strip(internal),
            EntryKind::File,
            &file,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::TIMESTAMP;
    use crate::api::response::parse_timestamp;
    use crate::fs::EntryKind;
    use crate::fs::operations::test_support::adapter;

    #[tokio::test]
    async fn test_write_into_existing_folder() {
        let (mock, adapter) = adapter();
        mock.add_folder("0", "a");

        let meta = adapter.write("/a/b.txt", b"hello").await.unwrap();
        assert_eq!(meta.path, "/a/b.txt");
        assert_eq!(meta.kind, EntryKind::File);
        assert_eq!(meta.size, Some(5));
        assert_eq!(meta.timestamp, parse_timestamp(TIMESTAMP));

        let id = mock.lookup("/a/b.txt").unwrap();
        assert_eq!(mock.contents(&id).unwrap(), b"hello");
        assert_eq!(adapter.cached("/a/b.txt").await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_metadata_after_write_needs_no_listing() {
        let (mock, adapter) = adapter();
        mock.add_folder("0", "a");

        adapter.write("/a/b.txt", b"hello").await.unwrap();
        let listings = mock.calls("list_folder");

        let meta = adapter.get_metadata("/a/b.txt").await.unwrap();
        assert_eq!(meta.size, Some(5));
        assert_eq!(mock.calls("list_folder"), listings);
        assert_eq!(mock.calls("get_file_info"), 1);
    }

    #[tokio::test]
    async fn test_write_creates_missing_ancestors() {
        let (mock, adapter) = adapter();

        adapter.write("/deep/er/file.bin", &[0, 1, 2]).await.unwrap();
        assert_eq!(mock.calls("create_folder"), 2);
        assert!(mock.lookup("/deep/er/file.bin").is_some());
        assert_eq!(
            adapter.cached("/deep/er").await.map(|e| e.kind),
            Some(EntryKind::Folder)
        );
    }

    #[tokio::test]
    async fn test_write_existing_name_fails() {
        let (mock, adapter) = adapter();
        mock.add_file("0", "taken.txt", b"old");

        let err = adapter.write("/taken.txt", b"new").await.unwrap_err();
        assert!(!err.is_not_found());
        let id = mock.lookup("/taken.txt").unwrap();
        assert_eq!(mock.contents(&id).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_write_under_recreated_folder_recovers() {
        let (mock, adapter) = adapter();
        let a = mock.add_folder("0", "a");
        adapter.write("/a/one.txt", b"1").await.unwrap();

        mock.remove_remote(&a);
        let a2 = mock.add_folder("0", "a");

        // The cached parent ID is stale: the upload fails and drops it
        let err = adapter.write("/a/two.txt", b"2").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(adapter.cached("/a").await.is_none());

        adapter.write("/a/two.txt", b"2").await.unwrap();
        assert_eq!(adapter.cached("/a").await.unwrap().id, a2);
        assert!(mock.child(&a2, "two.txt").is_some());
    }

    #[tokio::test]
    async fn test_write_to_root_path_fails() {
        let (_mock, adapter) = adapter();
        assert!(adapter.write("/", b"x").await.is_err());
    }

    #[tokio::test]
    async fn test_update_uploads_new_version() {
        let (mock, adapter) = adapter();
        let id = mock.add_file("0", "doc.txt", b"v1");

        let meta = adapter.update("/doc.txt", b"version two").await.unwrap();
        assert_eq!(meta.size, Some(11));
        assert_eq!(mock.version(&id), Some(2));
        assert_eq!(mock.contents(&id).unwrap(), b"version two");
        assert_eq!(mock.calls("upload_file"), 0);
    }

    #[tokio::test]
    async fn test_update_missing_file_falls_back_to_write() {
        let (mock, adapter) = adapter();

        let meta = adapter.update("/new/doc.txt", b"fresh").await.unwrap();
        assert_eq!(meta.path, "/new/doc.txt");
        assert_eq!(mock.calls("upload_new_file_version"), 0);
        assert_eq!(mock.calls("upload_file"), 1);
        assert!(mock.lookup("/new/doc.txt").is_some());
    }

    #[tokio::test]
    async fn test_update_on_folder_path_writes_nothing_over_it() {
        let (mock, adapter) = adapter();
        mock.add_folder("0", "dir");

        // Not a file, so this becomes a write, which Box rejects by name.
        assert!(adapter.update("/dir", b"x").await.is_err());
        assert_eq!(mock.calls("upload_new_file_version"), 0);
    }
}
