use serde_derive::Deserialize;

use crate::error::metainfo::MetainfoError;
use crate::path::validate_segment;
use crate::storage_info::FileEntry;

pub(crate) type Result<T> = std::result::Result<T, MetainfoError>;

/// The decoded metadata of a torrent file.
///
/// Only the parts that drive preallocation are kept: the `info` dictionary
/// with its `name`, `length` and `files` fields. Trackers, piece hashes and
/// every other key are skipped during decoding.
#[derive(Debug, Deserialize)]
pub struct Metainfo {
    /// The `info` dictionary describing the torrent's files.
    pub info: Info,
}

impl Metainfo {
    /// Decodes a [`Metainfo`] from the raw bytes of a `.torrent` file.
    ///
    /// This is only the bencode decoding step and performs no validation;
    /// [`extract_files`] turns the decoded `info` into checked
    /// [`FileEntry`] values.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_bencode::from_bytes(bytes)?)
    }
}

/// The torrent's `info` dictionary.
///
/// Every field is optional at the decode level. Which fields must be
/// present depends on whether the torrent is single or multi file, and
/// [`extract_files`] owns those rules, so that a failure always points at
/// the metadata and never at the decoder.
#[derive(Debug, Deserialize)]
pub struct Info {
    /// Suggested file name (single file torrent) or enclosing directory
    /// name (multi file torrent).
    pub name: Option<String>,
    #[serde(rename = "length")]
    /// Size of the file in bytes, present only in single file torrents.
    pub len: Option<i64>,
    /// One entry per file, present only in multi file torrents.
    pub files: Option<Vec<File>>,
}

/// One file of a multi file torrent.
#[derive(Debug, Deserialize)]
pub struct File {
    /// A list of subdirectory names, the last of which is the actual file
    /// name.
    pub path: Option<Vec<String>>,
    #[serde(rename = "length")]
    /// Size of the file in bytes.
    pub len: Option<i64>,
}

/// Derives the ordered list of files to preallocate from a decoded `info`
/// dictionary.
///
/// Here are some rules:
/// - the torrent name and every path segment must pass segment validation,
///   as all of them come from an untrusted source.
/// - a `files` list marks a multi file torrent; the torrent name becomes
///   the enclosing top level directory, and the list order is preserved
///   and becomes the preallocation order. A `length` key next to `files`
///   is ignored.
/// - without `files` the torrent is a single file named after the torrent,
///   and `length` must be present.
/// - every length must be non-negative; zero-length files are legal.
///
/// Extraction never partially succeeds: the first offending entry aborts
/// the whole call, and nothing is touched on disk (this function is pure).
pub fn extract_files(info: &Info) -> Result<Vec<FileEntry>> {
    let name = match &info.name {
        Some(name) => name,
        None => {
            log::warn!("No `name` key present in metainfo");
            return Err(MetainfoError::InvalidMetainfo);
        }
    };
    validate_segment(name)?;

    let mut entries = Vec::new();

    if let Some(files) = &info.files {
        entries.reserve_exact(files.len());

        for file in files {
            let path = match &file.path {
                Some(path) => path,
                None => {
                    log::warn!("File entry without `path` in metainfo");
                    return Err(MetainfoError::InvalidMetainfo);
                }
            };
            let len = file_len(file.len)?;

            for segment in path {
                validate_segment(segment)?;
            }

            let mut segments = Vec::with_capacity(path.len() + 1);
            segments.push(name.clone());
            segments.extend(path.iter().cloned());

            entries.push(FileEntry { segments, len });
        }
    } else {
        let len = file_len(info.len)?;

        entries.push(FileEntry {
            segments: vec![name.clone()],
            len,
        });
    }

    Ok(entries)
}

/// Checks that a decoded length is present and non-negative.
fn file_len(len: Option<i64>) -> Result<u64> {
    match len {
        Some(len) if len >= 0 => Ok(len as u64),
        Some(len) => {
            log::warn!("File length {} in metainfo is negative", len);
            Err(MetainfoError::InvalidMetainfo)
        }
        None => {
            log::warn!("No `length` key present in metainfo");
            Err(MetainfoError::InvalidMetainfo)
        }
    }
}
