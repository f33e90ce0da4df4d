use std::fs;
use std::path::Path;

use crate::alert::AlertHandler;
use crate::conf::Conf;
use crate::disk;
use crate::error::EngineResult;
use crate::metainfo::{extract_files, Metainfo};
use crate::storage_info::FileEntry;

/// The preallocation engine.
///
/// Drives one run end to end: read and decode the torrent file, extract
/// the validated file list, then reserve space for every file in metadata
/// order, reporting each stage through the caller's [`AlertHandler`].
pub struct Engine {
    conf: Conf,
}

impl Engine {
    pub fn new(conf: Conf) -> Self {
        Self { conf }
    }

    /// Runs the whole preallocation procedure for the torrent file at
    /// `torrent_path`.
    ///
    /// The first error aborts the run. Rerunning after the cause is fixed
    /// is safe: completed files are skipped and partially grown staging
    /// files resume from their current size.
    pub fn run(&self, torrent_path: &Path, alerts: &mut dyn AlertHandler) -> EngineResult<()> {
        alerts.start_reading_torrent_file(torrent_path);

        let bytes = fs::read(torrent_path)?;
        let metainfo = Metainfo::from_bytes(&bytes)?;

        alerts.end_reading_torrent_file(torrent_path);

        let files = extract_files(&metainfo.info)?;

        self.preallocate_files(&files, alerts)
    }

    /// Reserves space for an already extracted file list, in order.
    ///
    /// Exposed separately from [`run`](Self::run) so callers and tests can
    /// drive preallocation from entries they built themselves, without a
    /// torrent file on disk.
    pub fn preallocate_files(
        &self,
        files: &[FileEntry],
        alerts: &mut dyn AlertHandler,
    ) -> EngineResult<()> {
        log::info!(
            "Preallocating {} file(s) in {:?}",
            files.len(),
            self.conf.download_dir
        );

        alerts.start_preallocation_procedure();

        for entry in files {
            alerts.start_preallocation_file(entry);

            let skipped = disk::preallocate_file(
                &self.conf.download_dir,
                entry,
                self.conf.chunk_len,
                alerts,
            )?;

            alerts.end_preallocation_file(entry, skipped);
        }

        alerts.end_preallocation_procedure();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{Error, MetainfoError};

    /// Records the alert sequence as readable lines (positions left out,
    /// they are covered by the disk tests).
    #[derive(Default)]
    struct EventLog(Vec<String>);

    impl AlertHandler for EventLog {
        fn start_reading_torrent_file(&mut self, _path: &Path) {
            self.0.push("read start".into());
        }

        fn end_reading_torrent_file(&mut self, _path: &Path) {
            self.0.push("read end".into());
        }

        fn start_preallocation_procedure(&mut self) {
            self.0.push("procedure start".into());
        }

        fn end_preallocation_procedure(&mut self) {
            self.0.push("procedure end".into());
        }

        fn start_preallocation_file(&mut self, entry: &FileEntry) {
            self.0.push(format!("file start {}", entry.segments.join("/")));
        }

        fn end_preallocation_file(&mut self, entry: &FileEntry, skipped: bool) {
            self.0.push(format!(
                "file end {} skipped={}",
                entry.segments.join("/"),
                skipped
            ));
        }
    }

    #[test]
    fn runs_whole_procedure_for_a_multi_file_torrent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let torrent = dir.path().join("pkg.torrent");
        fs::write(
            &torrent,
            b"d4:infod5:filesl\
d6:lengthi5e4:pathl1:aee\
d6:lengthi0e4:pathl3:dir1:bee\
e4:name3:pkgee",
        )
        .unwrap();

        let engine = Engine::new(Conf::new(dest.path()).with_chunk_len(4));
        let mut log = EventLog::default();
        engine.run(&torrent, &mut log).unwrap();

        assert_eq!(
            fs::metadata(dest.path().join("pkg").join("a.part")).unwrap().len(),
            5
        );
        assert_eq!(
            fs::metadata(dest.path().join("pkg").join("dir").join("b.part"))
                .unwrap()
                .len(),
            0
        );
        assert_eq!(
            log.0,
            vec![
                "read start",
                "read end",
                "procedure start",
                "file start pkg/a",
                "file end pkg/a skipped=false",
                "file start pkg/dir/b",
                "file end pkg/dir/b skipped=false",
                "procedure end",
            ]
        );
    }

    #[test]
    fn runs_whole_procedure_for_a_single_file_torrent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let torrent = dir.path().join("single.torrent");
        fs::write(&torrent, b"d4:infod6:lengthi10e4:name5:a.txtee").unwrap();

        let engine = Engine::new(Conf::new(dest.path()).with_chunk_len(4));
        engine.run(&torrent, &mut ()).unwrap();

        assert_eq!(
            fs::metadata(dest.path().join("a.txt.part")).unwrap().len(),
            10
        );
    }

    #[test]
    fn rerun_skips_a_downloaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let torrent = dir.path().join("single.torrent");
        fs::write(&torrent, b"d4:infod6:lengthi10e4:name5:a.txtee").unwrap();
        // the downloader has since renamed the staging file
        fs::write(dest.path().join("a.txt"), b"0123456789").unwrap();

        let engine = Engine::new(Conf::new(dest.path()).with_chunk_len(4));
        let mut log = EventLog::default();
        engine.run(&torrent, &mut log).unwrap();

        assert_eq!(
            log.0,
            vec![
                "read start",
                "read end",
                "procedure start",
                "file start a.txt",
                "file end a.txt skipped=true",
                "procedure end",
            ]
        );
    }

    #[test]
    fn invalid_metadata_leaves_the_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let torrent = dir.path().join("evil.torrent");
        // name is ".."
        fs::write(&torrent, b"d4:infod6:lengthi10e4:name2:..ee").unwrap();

        let engine = Engine::new(Conf::new(dest.path()));
        let err = engine.run(&torrent, &mut ()).unwrap_err();

        assert!(matches!(
            err,
            Error::Metainfo(MetainfoError::UnsafePath(_))
        ));
        assert!(fs::read_dir(dest.path()).unwrap().next().is_none());
    }

    #[test]
    fn missing_torrent_file_is_an_io_error() {
        let dest = tempfile::tempdir().unwrap();
        let engine = Engine::new(Conf::new(dest.path()));

        let err = engine.run(Path::new("no-such.torrent"), &mut ()).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
