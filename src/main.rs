use std::path::{Path, PathBuf};

use anyhow::Context;
use bt_prealloc::{
    alert::AlertHandler, conf::Conf, engine::Engine, storage_info::FileEntry,
};
use clap::Parser;

/// A utility to preallocate a torrent's files before downloading.
#[derive(Parser, Debug)]
#[command(version)]
struct Arguments {
    /// Path to the source torrent file
    #[arg(value_name = "TORRENT_FILE")]
    torrent: PathBuf,
    /// Path to the downloading destination directory
    #[arg(value_name = "DEST_DIR")]
    dest: PathBuf,
    /// Show each file being preallocated and its progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Arguments::parse();

    let mut verbose = VerboseAlerts;
    let mut silent = ();
    let alerts: &mut dyn AlertHandler = if args.verbose {
        &mut verbose
    } else {
        &mut silent
    };

    let engine = Engine::new(Conf::new(&args.dest));
    engine.run(&args.torrent, alerts).with_context(|| {
        format!(
            "failed to preallocate {:?} into {:?}",
            args.torrent, args.dest
        )
    })
}

/// Prints one line per alert on standard output.
struct VerboseAlerts;

impl AlertHandler for VerboseAlerts {
    fn start_reading_torrent_file(&mut self, path: &Path) {
        println!("reading torrent file: {:?}...", path);
    }

    fn end_reading_torrent_file(&mut self, path: &Path) {
        println!("reading torrent file: {:?}: done", path);
    }

    fn start_preallocation_procedure(&mut self) {
        println!("preallocation procedure...");
    }

    fn end_preallocation_procedure(&mut self) {
        println!("preallocation procedure: done");
    }

    fn start_preallocation_file(&mut self, entry: &FileEntry) {
        println!(
            "preallocation file: {:?} {} ({})...",
            entry.relative_path(),
            entry.len,
            format_length(entry.len)
        );
    }

    fn end_preallocation_file(&mut self, entry: &FileEntry, skipped: bool) {
        let outcome = if skipped { "skipped" } else { "done" };
        println!(
            "preallocation file: {:?}: {}",
            entry.relative_path(),
            outcome
        );
    }

    fn preallocation_pos(&mut self, pos: u64) {
        println!("current position: {} ({})", pos, format_length(pos));
    }
}

/// Renders a byte count with a decimal unit, rounded up to tenths.
fn format_length(len: u64) -> String {
    const TABLE: [(u64, &str); 4] = [
        (1_000_000_000_000, "TB"),
        (1_000_000_000, "GB"),
        (1_000_000, "MB"),
        (1_000, "kB"),
    ];

    for (size, unit) in TABLE {
        if len >= size {
            let tenths =
                (u128::from(len) * 10 + u128::from(size) - 1) / u128::from(size);
            return format!("{}.{} {}", tenths / 10, tenths % 10, unit);
        }
    }

    format!("{} bytes", len)
}
