use std::path::PathBuf;

use crate::DEFAULT_CHUNK_LEN;

/// The configuration of the preallocation engine.
#[derive(Clone, Debug)]
pub struct Conf {
    /// The directory under which the torrent's files are reserved.
    ///
    /// Every path the engine creates or writes stays inside this
    /// directory.
    pub download_dir: PathBuf,
    /// The length in bytes of one write-and-sync cycle.
    ///
    /// Defaults to [`DEFAULT_CHUNK_LEN`]. Must be non-zero.
    pub chunk_len: u64,
}

impl Conf {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            chunk_len: DEFAULT_CHUNK_LEN,
        }
    }

    /// Overrides the chunk length, mostly to let tests exercise the chunk
    /// loop with tiny files.
    pub fn with_chunk_len(mut self, chunk_len: u64) -> Self {
        self.chunk_len = chunk_len;
        self
    }
}
