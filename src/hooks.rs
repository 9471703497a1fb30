//! Build-tool hook glue.
//!
//! The surrounding build/packaging tool calls the transform at two lifecycle
//! points: [`pre_build`] before a generic build step (the destination only
//! needs to exist) and [`pre_upload`] before the filesystem image is packed
//! and uploaded (the destination is regenerated from scratch). Errors are
//! never swallowed here; the caller decides whether to abort its pipeline.

use std::path::PathBuf;

use tracing::info;

use crate::error::PrepError;
use crate::mirror::{self, MirrorStats};
use crate::policy::MirrorPolicy;

/// Static configuration for the preparation hooks.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// The asset tree to read.
    pub source_root: PathBuf,
    /// The directory that gets packed into the filesystem image.
    pub dest_root: PathBuf,
    pub policy: MirrorPolicy,
}

impl Default for PrepConfig {
    /// The conventional project layout: assets in `data_source`, image
    /// contents in `data`.
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("data_source"),
            dest_root: PathBuf::from("data"),
            policy: MirrorPolicy::default(),
        }
    }
}

/// Pre-build hook: make sure the destination directory exists.
///
/// Never regenerates contents; an already-present destination is left
/// untouched and the build proceeds.
pub fn pre_build(config: &PrepConfig) -> Result<(), PrepError> {
    if mirror::ensure_destination_exists(&config.dest_root)? {
        info!("Creating {} directory for build", config.dest_root.display());
    }
    Ok(())
}

/// Pre-upload hook: full destructive rebuild of the destination tree.
///
/// Any failure propagates and should abort the upload step.
pub fn pre_upload(config: &PrepConfig) -> Result<MirrorStats, PrepError> {
    info!("Preparing {} directory...", config.dest_root.display());
    let stats = mirror::rebuild_destination(&config.source_root, &config.dest_root, &config.policy)?;
    info!(
        dirs = stats.dirs_created,
        compressed = stats.files_compressed,
        copied = stats.files_copied,
        "Data preparation completed"
    );
    Ok(stats)
}
