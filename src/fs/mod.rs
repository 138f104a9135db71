//! Path resolution, caching and the filesystem operations built on them.

pub mod cache;
pub mod entry;
pub(crate) mod operations;
pub mod path;
pub mod resolver;

pub use cache::PathCache;
pub use entry::{EntryKind, Metadata, PathEntry, ROOT_ID, Visibility};
pub use path::PathPrefix;
pub use resolver::Resolver;
