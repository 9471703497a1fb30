//! Filesystem metadata helpers for verbatim copies.
//!
//! The copy is done by hand rather than through `std::fs::copy` so that each
//! step (source open, destination create, data transfer, metadata transfer)
//! can attach the path it actually touched to the resulting error. Permission
//! bits and the modification time are carried over to the destination.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use filetime::FileTime;

use crate::error::PrepError;

/// Copy `src` to `dst` byte-for-byte, carrying over permission bits and the
/// modification time. Returns the number of bytes copied. Errors name the
/// side of the copy that failed.
pub fn copy_preserving(src: &Path, dst: &Path) -> Result<u64, PrepError> {
    let meta = fs::metadata(src).map_err(|e| PrepError::io(e, src))?;
    let mut reader = File::open(src).map_err(|e| PrepError::io(e, src))?;
    let mut writer = File::create(dst).map_err(|e| PrepError::io(e, dst))?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| PrepError::io(e, dst))?;
    writer
        .set_permissions(meta.permissions())
        .map_err(|e| PrepError::io(e, dst))?;
    drop(writer);
    filetime::set_file_mtime(dst, FileTime::from_last_modification_time(&meta))
        .map_err(|e| PrepError::io(e, dst))?;
    Ok(bytes)
}
