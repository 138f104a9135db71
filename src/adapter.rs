//! The path-based filesystem adapter.
//!
//! [`BoxAdapter`] owns one [`PathCache`] and one [`Gateway`]. Every public
//! operation takes the cache lock for its whole duration, so operations on a
//! single adapter are serialized and the cache never observes a half-applied
//! mutation. The adapter is `Send + Sync`; share it with `Arc`.

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::api::{ApiClient, Command, Gateway, Response};
use crate::config::ClientConfig;
use crate::error::{BoxError, Result};
use crate::fs::{EntryKind, PathCache, PathEntry, PathPrefix, Resolver};

/// Default cap on redirects followed by [`BoxAdapter::read`].
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Filesystem view of a Box account.
///
/// # Example
/// ```no_run
/// use boxfs::{BoxAdapter, ClientConfig};
///
/// # async fn example() -> boxfs::Result<()> {
/// let adapter = BoxAdapter::connect(ClientConfig::new("ACCESS_TOKEN"))?
///     .with_prefix("/Projects");
///
/// adapter.write("/notes/today.txt", b"hello").await?;
/// for entry in adapter.list_contents("/notes").await? {
///     println!("{} {}", entry.kind, entry.path);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BoxAdapter<G: Gateway = ApiClient> {
    pub(crate) gateway: G,
    pub(crate) prefix: PathPrefix,
    pub(crate) max_redirects: usize,
    cache: Mutex<PathCache>,
}

impl BoxAdapter<ApiClient> {
    /// Adapter over the real Box API.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(ApiClient::new(config)?))
    }
}

impl<G: Gateway> BoxAdapter<G> {
    /// Adapter over any gateway, rooted at the account root.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            prefix: PathPrefix::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            cache: Mutex::new(PathCache::new()),
        }
    }

    /// Confine every path below `prefix`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = PathPrefix::new(Some(prefix));
        self
    }

    /// Cap the number of redirects followed when reading.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The configured path prefix ("/" when unconfined).
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Forget every cached path except the root.
    ///
    /// Use after changes made outside this adapter.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Cached entry for a logical path, if any. Never calls the service.
    pub async fn cached(&self, path: &str) -> Option<PathEntry> {
        let internal = self.prefix.apply(path).ok()?;
        self.cache.lock().await.get(&internal).cloned()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, PathCache> {
        self.cache.lock().await
    }

    /// Resolve an internal path against the locked cache.
    pub(crate) async fn resolve(
        &self,
        cache: &mut PathCache,
        path: &str,
        kind: EntryKind,
    ) -> Result<Option<String>> {
        Resolver::new(&self.gateway, cache).resolve(path, kind).await
    }

    /// Execute a command, turning API failures into errors.
    pub(crate) async fn call(&self, command: &Command) -> Result<Response> {
        debug!(command = command.name(), id = command.target_id(), "executing");
        let response = self.gateway.execute(command).await?;
        if let Response::Failure { status, .. } = &response {
            warn!(
                command = command.name(),
                id = command.target_id(),
                status,
                "box command failed"
            );
        }
        response.into_result()
    }

    /// Execute a command keyed by an ID resolved from `path`; a 404 means the
    /// cached ID is stale, so the path (and anything below it) is evicted.
    pub(crate) async fn call_for(
        &self,
        cache: &mut PathCache,
        path: &str,
        command: &Command,
    ) -> Result<Response> {
        self.call_for_all(cache, &[path], command).await
    }

    /// Like [`call_for`](Self::call_for) for commands carrying several
    /// resolved IDs. A 404 does not say which one went stale, so every path
    /// is evicted and re-resolved on the next call.
    pub(crate) async fn call_for_all(
        &self,
        cache: &mut PathCache,
        paths: &[&str],
        command: &Command,
    ) -> Result<Response> {
        let result = self.call(command).await;
        if let Err(e) = &result {
            if e.is_not_found() {
                for path in paths {
                    debug!(%path, "evicting stale cache entry");
                    cache.remove_tree(path);
                }
            }
        }
        result
    }

    pub(crate) fn not_found(&self, internal: &str) -> BoxError {
        BoxError::NotFound(self.prefix.strip(internal))
    }
}
