//! Maps a requested path onto the document root.
//!
//! Resolution never opens the file. It answers whether the request names a
//! regular file that lives under the root, and how large that file is.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Why a requested path was not served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The path contains a parent-directory reference.
    Traversal,
    /// Nothing exists at the path.
    NotFound,
    /// The path names a directory, device, socket or similar.
    NotRegularFile,
    /// The path resolves (through symlinks) to somewhere outside the root.
    OutsideRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A regular file inside the root, with its size at resolution time.
    Valid { path: PathBuf, size: u64 },
    Rejected(RejectReason),
}

impl ResolvedTarget {
    pub fn is_valid(&self) -> bool {
        matches!(self, ResolvedTarget::Valid { .. })
    }
}

/// Returns true if `raw_path` tries to climb out of the directory it is
/// appended to.
pub fn is_traversal(raw_path: &str) -> bool {
    raw_path.contains("/../") || raw_path.split('/').any(|segment| segment == "..")
}

/// Resolves `raw_path` (as taken from the request line) against `root`.
///
/// `root` must already be canonical. The candidate path is the plain
/// concatenation of root and request path; it is then canonicalized and must
/// still be a descendant of `root`. Type and size come from one metadata
/// query on that canonical path.
pub async fn resolve(root: &Path, raw_path: &str) -> ResolvedTarget {
    if is_traversal(raw_path) {
        return ResolvedTarget::Rejected(RejectReason::Traversal);
    }

    let mut candidate = OsString::from(root.as_os_str());
    candidate.push(raw_path);
    let candidate = PathBuf::from(candidate);

    let Ok(canonical) = tokio::fs::canonicalize(&candidate).await else {
        return ResolvedTarget::Rejected(RejectReason::NotFound);
    };

    if !canonical.starts_with(root) {
        return ResolvedTarget::Rejected(RejectReason::OutsideRoot);
    }

    match tokio::fs::metadata(&canonical).await {
        Ok(meta) if meta.is_file() => ResolvedTarget::Valid {
            path: canonical,
            size: meta.len(),
        },
        Ok(_) => ResolvedTarget::Rejected(RejectReason::NotRegularFile),
        Err(_) => ResolvedTarget::Rejected(RejectReason::NotFound),
    }
}
