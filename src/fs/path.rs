//! Path helpers.

use crate::error::{BoxError, Result};

/// Normalize a path: collapse repeated separators, drop `.` components and
/// trailing slashes, and make it absolute. Empty and `.` become `/`.
pub fn normalize_path(path: &str) -> String {
    let mut result = String::from("/");
    for part in components(path) {
        if result.len() > 1 {
            result.push('/');
        }
        result.push_str(part);
    }
    result
}

/// Non-empty components of a path, skipping `.`. `..` is returned as is;
/// [`PathPrefix::apply`] rejects it before anything is resolved.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|p| !p.is_empty() && *p != ".")
}

/// Parent of a normalized path (`/` for top-level entries and the root).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Last component of a normalized path ("" for the root).
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a normalized parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Whether `path` equals `ancestor` or lies below it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return true;
    }
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Root confinement: logical paths are resolved below `prefix`, and the
/// prefix is stripped from every path handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    /// A prefix; `None`, `""` and `/` all mean the account root.
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: normalize_path(prefix.unwrap_or("/")),
        }
    }

    /// Normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Logical path → internal (absolute, normalized) path.
    ///
    /// Parent references (`..`) are refused rather than resolved, so a path
    /// can never climb out of the prefix.
    pub fn apply(&self, path: &str) -> Result<String> {
        if components(path).any(|part| part == "..") {
            return Err(BoxError::InvalidPath(path.to_string()));
        }
        let path = normalize_path(path);
        Ok(if self.prefix == "/" {
            path
        } else if path == "/" {
            self.prefix.clone()
        } else {
            format!("{}{}", self.prefix, path)
        })
    }

    /// Internal path → logical path.
    pub fn strip(&self, path: &str) -> String {
        if self.prefix == "/" {
            return path.to_string();
        }
        match path.strip_prefix(&self.prefix) {
            Some("") => "/".to_string(),
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => path.to_string(),
        }
    }
}

impl Default for PathPrefix {
    fn default() -> Self {
        Self::new(None)
    }
}
