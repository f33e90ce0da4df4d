use crate::error::path::PathError;

pub type Result<T, E = AllocError> = std::result::Result<T, E>;

/// Error type returned on failed file preallocations.
///
/// Allocation errors are fatal to the run; the supported recovery is to
/// rerun the whole procedure, which skips completed files and resumes
/// partially grown staging files from their current size.
#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error("{0}")]
    /// A joined path failed a safety check.
    Path(PathError),
    #[error("{0}")]
    /// An IO error occurred while creating a directory or growing the
    /// staging file.
    Io(std::io::Error),
}

impl From<PathError> for AllocError {
    fn from(value: PathError) -> Self {
        Self::Path(value)
    }
}

impl From<std::io::Error> for AllocError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
