//! # Traversal Planning
//!
//! Enumerates the filtered source tree as a lazy sequence of
//! (relative path, entry kind) pairs, decoupled from the destination I/O
//! that [`crate::mirror`] applies to each entry. Exclusions are pruned
//! during the walk, so a skipped directory's subtree is never visited.
//!
//! Enumeration order follows the filesystem and carries no meaning; the
//! mirrored result is order-independent.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PrepError;
use crate::policy::{FileClass, MirrorPolicy};

/// What a planned entry is on the source side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File(FileClass),
}

/// One node of the mirror plan, identified by its path relative to the
/// source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    pub rel_path: PathBuf,
    pub kind: EntryKind,
}

impl MirrorEntry {
    /// Destination path relative to the destination root. Compress-class
    /// files gain the policy suffix appended to their full name; directories
    /// and verbatim files keep their names unchanged.
    pub fn dest_rel_path(&self, policy: &MirrorPolicy) -> PathBuf {
        match self.kind {
            EntryKind::File(FileClass::Compress) => {
                let mut name = self
                    .rel_path
                    .file_name()
                    .unwrap_or_default()
                    .to_os_string();
                name.push(".");
                name.push(&policy.compressed_suffix);
                self.rel_path.with_file_name(name)
            }
            _ => self.rel_path.clone(),
        }
    }
}

/// Lazily enumerate the filtered source tree rooted at `source_root`.
///
/// The root itself is not yielded; all paths are relative to it. Parent
/// directories are yielded before their contents. Entries that are neither
/// directories nor regular files (e.g. symlinks) are classified as files
/// and left to the copy stage, which reads through them if readable.
pub fn plan<'a>(
    source_root: &'a Path,
    policy: &'a MirrorPolicy,
) -> impl Iterator<Item = Result<MirrorEntry, PrepError>> + 'a {
    WalkDir::new(source_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(move |entry| {
            // Never prune the root itself, whatever it is named.
            entry.depth() == 0 || !policy.excludes_entry(entry.file_name())
        })
        .map(move |entry| {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                PrepError::Io { source: e.into(), path }
            })?;
            let rel_path = entry
                .path()
                .strip_prefix(source_root)
                .map_err(|_| PrepError::StripPrefix {
                    prefix: source_root.to_path_buf(),
                    path: entry.path().to_path_buf(),
                })?
                .to_path_buf();
            let kind = if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File(policy.classify(entry.path()))
            };
            Ok(MirrorEntry { rel_path, kind })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn collect(root: &Path, policy: &MirrorPolicy) -> Vec<MirrorEntry> {
        let mut entries: Vec<MirrorEntry> = plan(root, policy).map(|e| e.unwrap()).collect();
        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        entries
    }

    #[test]
    fn plan_lists_dirs_and_classified_files() {
        let src = tempdir().unwrap();
        fs::create_dir(src.path().join("web")).unwrap();
        fs::write(src.path().join("web/index.html"), b"<html/>").unwrap();
        fs::write(src.path().join("firmware.bin"), b"\x00\x01").unwrap();

        let policy = MirrorPolicy::default();
        let entries = collect(src.path(), &policy);
        assert_eq!(
            entries,
            vec![
                MirrorEntry {
                    rel_path: PathBuf::from("firmware.bin"),
                    kind: EntryKind::File(FileClass::Verbatim),
                },
                MirrorEntry { rel_path: PathBuf::from("web"), kind: EntryKind::Dir },
                MirrorEntry {
                    rel_path: PathBuf::from("web/index.html"),
                    kind: EntryKind::File(FileClass::Compress),
                },
            ]
        );
    }

    #[test]
    fn excluded_subtrees_are_pruned() {
        let src = tempdir().unwrap();
        fs::create_dir_all(src.path().join("mock/deep")).unwrap();
        fs::write(src.path().join("mock/deep/y.txt"), b"y").unwrap();
        fs::create_dir(src.path().join(".hidden")).unwrap();
        fs::write(src.path().join(".hidden/x.txt"), b"x").unwrap();
        fs::write(src.path().join(".dotfile"), b"d").unwrap();
        fs::write(src.path().join("kept.txt"), b"k").unwrap();

        let policy = MirrorPolicy::default();
        let entries = collect(src.path(), &policy);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rel_path, PathBuf::from("kept.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_hidden_names_are_pruned() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let src = tempdir().unwrap();
        fs::write(src.path().join(OsStr::from_bytes(b".secret\xff")), b"hidden").unwrap();
        fs::write(src.path().join("kept.txt"), b"k").unwrap();

        let policy = MirrorPolicy::default();
        let entries = collect(src.path(), &policy);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rel_path, PathBuf::from("kept.txt"));
    }

    #[test]
    fn exclusion_applies_at_any_depth() {
        let src = tempdir().unwrap();
        fs::create_dir_all(src.path().join("sub/mock")).unwrap();
        fs::write(src.path().join("sub/mock/z.txt"), b"z").unwrap();
        fs::write(src.path().join("sub/c.txt"), b"c").unwrap();

        let policy = MirrorPolicy::default();
        let entries = collect(src.path(), &policy);
        let paths: Vec<_> = entries.iter().map(|e| e.rel_path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("sub"), PathBuf::from("sub/c.txt")]);
    }

    #[test]
    fn dest_rel_path_suffixes_only_compressed_files() {
        let policy = MirrorPolicy::default();
        let dir = MirrorEntry { rel_path: PathBuf::from("sub"), kind: EntryKind::Dir };
        assert_eq!(dir.dest_rel_path(&policy), PathBuf::from("sub"));

        let verbatim = MirrorEntry {
            rel_path: PathBuf::from("sub/b.bin"),
            kind: EntryKind::File(FileClass::Verbatim),
        };
        assert_eq!(verbatim.dest_rel_path(&policy), PathBuf::from("sub/b.bin"));

        let compressed = MirrorEntry {
            rel_path: PathBuf::from("sub/a.txt"),
            kind: EntryKind::File(FileClass::Compress),
        };
        assert_eq!(compressed.dest_rel_path(&policy), PathBuf::from("sub/a.txt.gz"));
    }

    #[test]
    fn dest_rel_path_honours_custom_suffix() {
        let mut policy = MirrorPolicy::default();
        policy.compressed_suffix = "gzip".to_string();
        let entry = MirrorEntry {
            rel_path: PathBuf::from("a.txt"),
            kind: EntryKind::File(FileClass::Compress),
        };
        assert_eq!(entry.dest_rel_path(&policy), PathBuf::from("a.txt.gzip"));
    }
}
