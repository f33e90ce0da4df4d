//! This module defines the alerts the API user may receive from the
//! preallocation engine.
//!
//! Alerts are delivered synchronously through the [`AlertHandler`] trait,
//! at fixed points of the procedure. Every method has a no-op default
//! body, so a handler only implements the alerts it cares about and an
//! unimplemented alert is silently dropped, never an error. The unit type
//! implements the trait with every alert ignored, for callers that want no
//! alerts at all.

use std::path::Path;

use crate::storage_info::FileEntry;

/// The lifecycle alerts emitted during one preallocation run.
pub trait AlertHandler {
    /// The torrent file at `path` is about to be read and decoded.
    fn start_reading_torrent_file(&mut self, _path: &Path) {}

    /// The torrent file at `path` was read and decoded.
    fn end_reading_torrent_file(&mut self, _path: &Path) {}

    /// Preallocation is about to start for the whole file list.
    fn start_preallocation_procedure(&mut self) {}

    /// Every file in the list was preallocated or skipped.
    fn end_preallocation_procedure(&mut self) {}

    /// Space is about to be reserved for one file.
    fn start_preallocation_file(&mut self, _entry: &FileEntry) {}

    /// One file is done; `skipped` is set when the final file already
    /// existed and nothing had to be written.
    fn end_preallocation_file(&mut self, _entry: &FileEntry, _skipped: bool) {}

    /// The staging file currently holds `pos` bytes. Emitted before every
    /// chunk write and one final time when the target length is reached.
    fn preallocation_pos(&mut self, _pos: u64) {}
}

/// The "no alerts" handler.
impl AlertHandler for () {}
