//! # File Policy
//!
//! Decides what happens to each entry of the source tree: regular files are
//! either gzip-compressed (the default) or copied verbatim, keyed on their
//! lowercased extension; hidden entries and a configurable set of names are
//! skipped entirely, subtree included.
//!
//! The whole policy is an explicit value passed into the transform, so tests
//! and callers can swap in alternate extension sets without touching globals.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use flate2::Compression;

/// Classification of a regular file under the mirror policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Copy byte-for-byte, keeping the original name.
    Verbatim,
    /// Gzip the content and append the compressed suffix to the name.
    Compress,
}

/// Holds all configuration for a mirror operation.
#[derive(Debug, Clone)]
pub struct MirrorPolicy {
    /// Extensions (lowercase, no leading dot) whose files are copied
    /// without compression.
    pub verbatim_exts: HashSet<String>,
    /// Exact entry names whose whole subtree is skipped. Names starting
    /// with `.` are always skipped regardless of this set.
    pub excluded_names: HashSet<String>,
    /// Suffix (no leading dot) appended to compressed output names.
    pub compressed_suffix: String,
    /// Gzip effort level.
    pub level: Compression,
}

impl Default for MirrorPolicy {
    /// The stock policy: firmware-style blobs (`bin`, `ir`, `data`) are kept
    /// as-is, `mock` subtrees are skipped, everything else becomes `.gz` at
    /// maximum compression.
    fn default() -> Self {
        Self {
            verbatim_exts: ["bin", "ir", "data"].iter().map(|s| s.to_string()).collect(),
            excluded_names: ["mock"].iter().map(|s| s.to_string()).collect(),
            compressed_suffix: "gz".to_string(),
            level: Compression::best(),
        }
    }
}

impl MirrorPolicy {
    /// True if an entry with this name is skipped along with its entire
    /// subtree: hidden (dot-prefixed) names and the excluded-name set.
    /// Hidden detection works on raw bytes, so a name that is not valid
    /// UTF-8 still counts as hidden when it starts with `.`.
    pub fn excludes_entry(&self, name: &OsStr) -> bool {
        if name.as_encoded_bytes().first() == Some(&b'.') {
            return true;
        }
        name.to_str().map_or(false, |n| self.excluded_names.contains(n))
    }

    /// `&str` convenience form of [`Self::excludes_entry`].
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excludes_entry(OsStr::new(name))
    }

    /// Classify a file by its lowercased extension. Total: any extension not
    /// in the verbatim set (including no extension at all) compresses.
    pub fn classify(&self, path: &Path) -> FileClass {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if self.verbatim_exts.contains(&ext.to_ascii_lowercase()) => FileClass::Verbatim,
            _ => FileClass::Compress,
        }
    }
}
