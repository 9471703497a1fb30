//! # The Mirror Transform
//!
//! Recursively reproduces a filtered, policy-transformed copy of a source
//! directory tree at a destination path: each regular file is either
//! gzip-compressed into `<name>.gz` or copied verbatim per
//! [`MirrorPolicy`], and the directory structure is preserved 1:1.
//!
//! Three operations cover the lifecycle:
//!
//! 1. [`mirror`]: the transform itself, writing into an existing or new
//!    destination without clearing it first.
//! 2. [`ensure_destination_exists`]: idempotent presence check used before a
//!    generic build step; never regenerates contents.
//! 3. [`rebuild_destination`]: destroy-then-recreate variant used before the
//!    filesystem image is packed and uploaded.
//!
//! The transform is single-threaded and synchronous. Any I/O failure aborts
//! the whole operation; there is no partial-success mode and no retry. Each
//! output file is written completely before the next entry is processed.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::PrepError;
use crate::fsx;
use crate::policy::{FileClass, MirrorPolicy};
use crate::walk::{self, EntryKind};

/// Counters reported by a completed mirror run.
#[derive(Debug, Default, Clone, Copy)]
pub struct MirrorStats {
    pub dirs_created: u64,
    pub files_compressed: u64,
    pub files_copied: u64,
    /// Total source bytes read.
    pub bytes_in: u64,
    /// Total destination bytes written.
    pub bytes_out: u64,
}

/// Mirror the tree under `source_root` into `dest_root`.
///
/// Creates `dest_root` (and missing parents) if absent. Fails with
/// [`PrepError::SourceMissing`] when `source_root` is not a directory.
pub fn mirror(
    source_root: &Path,
    dest_root: &Path,
    policy: &MirrorPolicy,
) -> Result<MirrorStats, PrepError> {
    if !source_root.is_dir() {
        return Err(PrepError::SourceMissing { path: source_root.to_path_buf() });
    }
    fs::create_dir_all(dest_root).map_err(|e| PrepError::io(e, dest_root))?;

    let mut stats = MirrorStats::default();
    for planned in walk::plan(source_root, policy) {
        let entry = planned?;
        let source_path = source_root.join(&entry.rel_path);
        let dest_path = dest_root.join(entry.dest_rel_path(policy));

        match entry.kind {
            EntryKind::Dir => {
                fs::create_dir_all(&dest_path).map_err(|e| PrepError::io(e, &dest_path))?;
                stats.dirs_created += 1;
            }
            EntryKind::File(FileClass::Verbatim) => {
                let bytes = fsx::copy_preserving(&source_path, &dest_path)?;
                debug!(path = %entry.rel_path.display(), bytes, "copied verbatim");
                stats.files_copied += 1;
                stats.bytes_in += bytes;
                stats.bytes_out += bytes;
            }
            EntryKind::File(FileClass::Compress) => {
                let (read, written) = compress_file(&source_path, &dest_path, policy.level)?;
                debug!(path = %entry.rel_path.display(), read, written, "compressed");
                stats.files_compressed += 1;
                stats.bytes_in += read;
                stats.bytes_out += written;
            }
        }
    }
    Ok(stats)
}

/// Create `dest_root` (and missing parents) iff it does not exist.
///
/// Existing contents are never touched and the mirror is never run; returns
/// whether the directory was actually created.
pub fn ensure_destination_exists(dest_root: &Path) -> Result<bool, PrepError> {
    if dest_root.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dest_root).map_err(|e| PrepError::io(e, dest_root))?;
    Ok(true)
}

/// Remove any existing destination tree, then run [`mirror`] fresh.
///
/// Destructive: prior destination contents are discarded entirely. A failure
/// during removal surfaces as [`PrepError::DestinationRemoval`] and may leave
/// the destination partially removed.
pub fn rebuild_destination(
    source_root: &Path,
    dest_root: &Path,
    policy: &MirrorPolicy,
) -> Result<MirrorStats, PrepError> {
    if dest_root.exists() {
        fs::remove_dir_all(dest_root).map_err(|e| PrepError::DestinationRemoval {
            source: e,
            path: dest_root.to_path_buf(),
        })?;
    }
    mirror(source_root, dest_root, policy)
}

/// Gzip the full content of `src` into `dst` at the given effort level.
/// Returns (bytes read, bytes written). The stream round-trips: gunzipping
/// the output recovers the source bytes exactly. Errors name the side of
/// the transfer that failed.
fn compress_file(src: &Path, dst: &Path, level: Compression) -> Result<(u64, u64), PrepError> {
    let mut reader = File::open(src).map_err(|e| PrepError::io(e, src))?;
    let out = File::create(dst).map_err(|e| PrepError::io(e, dst))?;
    let mut encoder = GzEncoder::new(out, level);
    let read = io::copy(&mut reader, &mut encoder).map_err(|e| PrepError::io(e, dst))?;
    let out = encoder.finish().map_err(|e| PrepError::io(e, dst))?;
    let written = out.metadata().map_err(|e| PrepError::io(e, dst))?.len();
    Ok((read, written))
}
