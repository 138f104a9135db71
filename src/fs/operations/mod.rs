//! Filesystem operations split into focused modules.

mod browse;
mod dir_ops;
mod download;
mod file_ops;
mod write;
