//! Safety checks for paths built from torrent metadata.
//!
//! A malicious torrent can carry segments like `..` or `/etc/passwd`, or
//! rely on symlinks already present in the download directory, to make the
//! preallocator write outside of it. Both checks in this module are applied
//! as defense in depth: [`validate_segment`] rejects the classic traversal
//! tokens in raw metadata, [`assert_within_root`] catches what segment
//! validation cannot see once paths are joined and resolved.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::path::{PathError, Result};

/// Checks that a single path segment from torrent metadata is safe to join.
///
/// Fails if the segment contains a path separator or a NUL byte, or equals
/// `.` or `..`. Applied to individual segments only, never to a joined
/// path.
pub fn validate_segment(name: &str) -> Result<()> {
    let has_separator = name.chars().any(std::path::is_separator);

    if has_separator || name.contains('\0') || name == "." || name == ".." {
        log::warn!("Unsafe path segment in metainfo: {:?}", name);
        return Err(PathError::UnsafeSegment(name.to_string()));
    }

    Ok(())
}

/// Checks that `candidate` stays inside `root` once both are resolved to
/// their canonical, symlink-free form.
///
/// The comparison is component-wise ([`Path::starts_with`]), so a sibling
/// directory sharing a string prefix with the root does not pass. Must be
/// called after every path join and before any filesystem mutation against
/// the joined path.
pub fn assert_within_root(root: &Path, candidate: &Path) -> Result<()> {
    let real_root = resolve(root)?;
    let real_candidate = resolve(candidate)?;

    if !real_candidate.starts_with(&real_root) {
        log::warn!(
            "Path {:?} ({:?}) escapes download directory {:?} ({:?})",
            candidate,
            real_candidate,
            root,
            real_root
        );
        return Err(PathError::OutsideRoot {
            path: candidate.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    Ok(())
}

/// Resolves a path to its canonical absolute form.
///
/// The candidate of a containment check often does not exist yet (a
/// directory about to be created, a staging file about to be opened). In
/// that case its parent is resolved and the final component re-appended.
/// The fallback is only taken when nothing at all exists at the path: a
/// dangling symlink also fails `canonicalize` with `NotFound`, but must
/// not be resolved through its parent or its target would go unchecked.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == io::ErrorKind::NotFound && path.symlink_metadata().is_err() => {
            let parent = path
                .parent()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no parent"))?;
            let name = path.file_name().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
            })?;
            Ok(parent.canonicalize()?.join(name))
        }
        Err(e) => Err(e),
    }
}
