//! POSIX path helpers for repo-relative record paths.
//!
//! Record paths are plain strings, never `std::path::Path`: the engine must
//! behave identically on every host, and `Path` would reinterpret backslashes
//! and drive prefixes on Windows.

use super::errors::PathViolation;

/// Path of the repository root directory.
pub const ROOT: &str = ".";

/// Check a record path against the normalized POSIX contract.
pub fn validate(path: &str) -> Result<(), PathViolation> {
    if path.is_empty() {
        return Err(PathViolation::Empty);
    }
    if path.contains('\\') {
        return Err(PathViolation::Backslash);
    }
    if path.starts_with('/') {
        return Err(PathViolation::Absolute);
    }
    if path.ends_with('/') {
        return Err(PathViolation::TrailingSlash);
    }

    for segment in path.split('/') {
        match segment {
            "" => return Err(PathViolation::EmptySegment),
            ".." => return Err(PathViolation::ParentTraversal),
            "." => return Err(PathViolation::CurrentDirSegment),
            _ => {}
        }
    }

    Ok(())
}

/// Parent directory of a path, `.` for top-level entries.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ROOT,
    }
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Extension of the last segment including the dot, lowercased.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(name[idx..].to_ascii_lowercase()),
    }
}

/// Directory depth: number of segments, with the root at depth 0.
pub fn depth(dir: &str) -> usize {
    if dir == ROOT {
        0
    } else {
        dir.split('/').count()
    }
}

/// Directory segments of a file path (file name excluded).
pub fn dir_segments(path: &str) -> impl Iterator<Item = &str> {
    let dir = parent(path);
    dir.split('/').filter(move |_| dir != ROOT)
}

/// Every ancestor directory of a file path, deepest first, ending at the root.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(parent(path)), |dir| {
        if *dir == ROOT {
            None
        } else {
            Some(parent(*dir))
        }
    })
}
