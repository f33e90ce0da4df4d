use std::path::PathBuf;

pub type Result<T, E = PathError> = std::result::Result<T, E>;

/// Error type returned on failed path safety checks.
///
/// Every path segment in torrent metadata is attacker-influenced, so each
/// segment and each joined path is checked before anything touches the
/// filesystem. None of these errors is recovered from; they abort the run.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("unsafe file name: {0:?}")]
    /// A metadata segment contains a path separator or NUL byte, or is one
    /// of the traversal tokens `.` and `..`.
    UnsafeSegment(String),

    #[error("file {path:?} not in directory {root:?}")]
    /// A resolved path would land outside the download directory.
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("{0}")]
    /// An IO error occurred while resolving a path.
    Io(std::io::Error),
}

impl From<std::io::Error> for PathError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
