//! The filesystem side of preallocation: building each file's directory
//! chain and growing its staging file to the declared length.

use std::fs::{self, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use crate::alert::AlertHandler;
use crate::error::disk::{AllocError, Result};
use crate::path::assert_within_root;
use crate::storage_info::FileEntry;


/// Reserves space for one file below the download directory.
///
/// The directories named by the entry are created as needed; every joined
/// path, directory or file, is validated against the download directory
/// before it is touched. The file's bytes are reserved in a `<name>.part`
/// staging file that grows in `chunk_len` steps with a durability sync
/// after each step, so the staging file's size is always a trustworthy
/// resume point and a rerun continues exactly where an interrupted run
/// stopped.
///
/// Returns `true` if the final file already exists and the entry was
/// skipped as already downloaded.
///
/// The staging file is never renamed here: the downloader that later
/// writes real content owns the rename into the final name. A staging
/// file that already reached its target size makes reruns no-ops in the
/// write loop.
pub fn preallocate_file(
    download_dir: &Path,
    entry: &FileEntry,
    chunk_len: u64,
    alerts: &mut dyn AlertHandler,
) -> Result<bool> {
    log::debug!(
        "Preallocating file {:?} ({} bytes) in dir {:?}",
        entry.relative_path(),
        entry.len,
        download_dir
    );

    let mut dir_path = download_dir.to_path_buf();

    for dir_name in entry.dir_segments() {
        dir_path.push(dir_name);
        assert_within_root(download_dir, &dir_path)?;

        if let Err(e) = fs::create_dir(&dir_path) {
            if e.kind() != io::ErrorKind::AlreadyExists {
                log::warn!("Failed to create directory {:?}: {}", dir_path, e);
                return Err(AllocError::Io(e));
            }
        }
    }

    let file_path = dir_path.join(entry.file_name());
    assert_within_root(download_dir, &file_path)?;

    if file_path.is_file() {
        // already downloaded; only existence is checked, never size or
        // content, so a truncated final file still counts (kept behavior)
        log::debug!("File {:?} already exists, skipping", file_path);
        return Ok(true);
    }

    let part_path = dir_path.join(format!("{}.part", entry.file_name()));
    assert_within_root(download_dir, &part_path)?;

    grow_part_file(&part_path, entry.len, chunk_len, alerts)?;

    Ok(false)
}

/// Grows the staging file at `part_path` to `len` bytes, writing zeros in
/// chunks aligned to `chunk_len` boundaries and syncing after each chunk.
///
/// The file is opened in append mode and its current size is the starting
/// position, whichever run wrote it.
fn grow_part_file(
    part_path: &Path,
    len: u64,
    chunk_len: u64,
    alerts: &mut dyn AlertHandler,
) -> Result<()> {
    debug_assert!(chunk_len > 0);

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(part_path)
        .map_err(|e| {
            log::warn!("Failed to open staging file {:?}: {}", part_path, e);
            AllocError::Io(e)
        })?;

    // one zero buffer reused for every chunk; a chunk never spans more
    // than the distance to the next chunk_len boundary nor the whole file
    let buf = vec![0u8; chunk_len.min(len) as usize];

    loop {
        let pos = file.seek(SeekFrom::End(0))?;

        alerts.preallocation_pos(pos);

        if pos >= len {
            break;
        }

        // advance to the next chunk_len boundary, but never past len
        let next = (pos / chunk_len + 1) * chunk_len;
        let l = next.min(len) - pos;

        file.write_all(&buf[..l as usize])?;
        file.sync_all()?;

        log::trace!("Staging file {:?} grown to {} bytes", part_path, pos + l);
    }

    Ok(())
}
