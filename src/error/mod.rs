//! Set of module Error
pub mod disk;
pub mod metainfo;
pub mod path;

pub use disk::AllocError;
pub use metainfo::MetainfoError;
pub use path::PathError;

pub type EngineResult<T, E = Error> = std::result::Result<T, E>;

/// The error type returned by a whole preallocation run.
///
/// Every variant is fatal: the run stops at the first error and performs no
/// bookkeeping beyond the staging files already on disk.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    /// Reading the torrent file from disk failed.
    Io(std::io::Error),
    #[error("{0}")]
    /// The torrent metadata could not be decoded or validated.
    Metainfo(MetainfoError),
    #[error("{0}")]
    /// Reserving space for one of the files failed.
    Alloc(AllocError),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MetainfoError> for Error {
    fn from(value: MetainfoError) -> Self {
        Self::Metainfo(value)
    }
}

impl From<AllocError> for Error {
    fn from(value: AllocError) -> Self {
        Self::Alloc(value)
    }
}
