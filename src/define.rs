/// The default preallocation chunk length, 32 MiB.
///
/// A chunk is one write-and-sync cycle of the staging file. The value only
/// affects I/O batching and how much work an interrupted run can lose,
/// never the allocated result.
pub const DEFAULT_CHUNK_LEN: u64 = 32 * 1024 * 1024;
