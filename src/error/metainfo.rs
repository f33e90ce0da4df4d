use serde_bencode::Error as BencodeError;

use crate::error::path::PathError;

#[derive(thiserror::Error, Debug)]
pub enum MetainfoError {
    #[error("{0}")]
    /// The torrent file is not valid bencode or a field has the wrong
    /// shape.
    Bencode(BencodeError),
    #[error("invalid metainfo")]
    /// The metadata is missing a required field or a value is out of range.
    InvalidMetainfo,
    #[error("{0}")]
    /// A name or path segment in the metadata is not safe to join.
    UnsafePath(PathError),
}

impl From<BencodeError> for MetainfoError {
    fn from(error: BencodeError) -> Self {
        Self::Bencode(error)
    }
}

impl From<PathError> for MetainfoError {
    fn from(error: PathError) -> Self {
        Self::UnsafePath(error)
    }
}
