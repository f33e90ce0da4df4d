use std::path::PathBuf;

/// One file to reserve space for, as derived from torrent metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The file's path below the download directory, one segment per
    /// element. The last segment is the file name, the ones before it are
    /// directory names, outermost first. Never empty; every segment passed
    /// safety validation when the entry was extracted.
    pub segments: Vec<String>,
    /// The file's length in bytes.
    pub len: u64,
}

impl FileEntry {
    /// The directory segments leading up to the file, outermost first.
    pub fn dir_segments(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, dirs)) => dirs,
            None => &[],
        }
    }

    /// The final segment, the actual file name.
    pub fn file_name(&self) -> &str {
        match self.segments.split_last() {
            Some((name, _)) => name,
            None => "",
        }
    }

    /// The file's relative path below the download directory.
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}
