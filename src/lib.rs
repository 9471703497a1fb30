//! # fsprep Core Library
//!
//! This crate provides the core functionality for the `fsprep` tool.
//!
//! It prepares a deployable data-filesystem image from a source asset tree:
//! the source directory is mirrored into a destination directory, with each
//! regular file either gzip-compressed (the default) or copied byte-for-byte
//! (firmware-style blobs), while hidden entries and mock data are skipped.
//! The destination is what gets packed into the device filesystem image.
//!
//! It is designed to be used by the `fsprep` command-line application, but its
//! public API can also be wired directly into a build pipeline via [`hooks`].
//!
//! ## Key Modules
//!
//! - [`policy`]: The per-file classification rules (compress vs. verbatim) and exclusions.
//! - [`walk`]: Pure traversal planning over the filtered source tree.
//! - [`mirror`]: The transform itself plus the ensure/rebuild lifecycle operations.
//! - [`hooks`]: Pre-build and pre-upload entry points for build-tool integration.

pub mod cli;
pub mod error;
pub use error::PrepError;

pub mod hooks;
pub mod mirror;
pub mod policy;
pub mod walk;

// Filesystem metadata helpers for verbatim copies
pub mod fsx;
