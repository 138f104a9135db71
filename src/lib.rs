//! # boxfs
//!
//! Path-based filesystem adapter for Box cloud storage.
//!
//! ## Features
//!
//! - **Path resolution**: Box addresses everything by numeric ID; paths are
//!   resolved by walking folder listings from the root, with every level
//!   cached so repeat lookups cost nothing.
//! - **Filesystem Operations**:
//!   - Write, update and read files (downloads follow Box's redirects).
//!   - Rename/move, copy and delete files.
//!   - Create directories (with missing ancestors) and delete them recursively.
//!   - List folder contents, check existence, fetch size, timestamp and MIME type.
//! - **Root confinement**: an optional prefix scopes every path below a folder.
//! - **Pluggable transport**: operations go through the [`Gateway`] trait;
//!   [`ApiClient`] talks to the Box REST API over reqwest.
//!
//! The path cache only sees changes made through the adapter. Call
//! [`BoxAdapter::clear_cache`] after remote changes made elsewhere; stale IDs
//! are also evicted automatically whenever Box answers `404` for them.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use boxfs::{BoxAdapter, ClientConfig};
//!
//! # async fn example() -> boxfs::Result<()> {
//! let adapter = BoxAdapter::connect(ClientConfig::from_env()?)?;
//!
//! // Parent folders are created as needed
//! adapter.write("/reports/2024/summary.txt", b"all good").await?;
//!
//! for entry in adapter.list_contents("/reports/2024").await? {
//!     println!("{} ({:?} bytes)", entry.path, entry.size);
//! }
//!
//! let bytes = adapter.read("/reports/2024/summary.txt").await?;
//! assert_eq!(bytes, b"all good");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;

// Re-export commonly used types
pub use adapter::{BoxAdapter, DEFAULT_MAX_REDIRECTS};
pub use api::{ApiClient, Command, Gateway, Response};
pub use config::ClientConfig;
pub use error::{BoxError, Result};
pub use fs::{EntryKind, Metadata, PathEntry, Visibility};
