use clap::{Parser, Subcommand};
use flate2::Compression;
use std::path::PathBuf;

use crate::policy::MirrorPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Mirror the source tree into the destination without clearing it first.
    #[command(alias = "m")]
    Mirror {
        /// The source asset tree to read.
        #[arg(required = true)]
        source: PathBuf,

        /// The destination directory to produce.
        #[arg(required = true)]
        dest: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Create the destination directory if it is missing (pre-build hook).
    ///
    /// Existing contents are left untouched; nothing is regenerated.
    #[command(alias = "e")]
    Ensure {
        /// The destination directory to create if absent.
        #[arg(required = true)]
        dest: PathBuf,
    },

    /// Destroy and regenerate the destination tree (pre-upload hook).
    #[command(alias = "r")]
    Rebuild {
        /// The source asset tree to read.
        #[arg(required = true)]
        source: PathBuf,

        /// The destination directory to wipe and regenerate.
        #[arg(required = true)]
        dest: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Policy options shared by `mirror` and `rebuild`.
#[derive(clap::Args, Clone, Debug)]
pub struct PolicyArgs {
    /// Extension copied verbatim instead of compressed. Repeatable; when given, replaces the default set {bin, ir, data}.
    #[arg(long = "verbatim-ext", value_name = "EXT")]
    pub verbatim_ext: Vec<String>,

    /// Entry name whose whole subtree is skipped. Repeatable; when given, replaces the default {mock}. Dot-prefixed names are always skipped.
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Suffix appended to compressed output names.
    #[arg(long, default_value = "gz")]
    pub suffix: String,

    /// Gzip compression level (0-9).
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

impl PolicyArgs {
    /// Build a [`MirrorPolicy`] from the parsed options, keeping the stock
    /// defaults for any set the user left empty. Leading dots on extensions
    /// and the suffix are tolerated and stripped.
    pub fn to_policy(&self) -> MirrorPolicy {
        let mut policy = MirrorPolicy::default();
        if !self.verbatim_ext.is_empty() {
            policy.verbatim_exts = self
                .verbatim_ext
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect();
        }
        if !self.exclude.is_empty() {
            policy.excluded_names = self.exclude.iter().cloned().collect();
        }
        policy.compressed_suffix = self.suffix.trim_start_matches('.').to_string();
        policy.level = Compression::new(self.level);
        policy
    }
}

/// Parses command-line arguments using `clap` and returns the command to execute.
///
/// This is the main entry point for the CLI logic. It handles parsing and
/// returns a `Commands` enum variant, or an error if parsing fails.
pub fn run() -> Result<Commands, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FileClass;
    use std::path::Path;

    #[test]
    fn empty_policy_args_keep_defaults() {
        let args = PolicyArgs {
            verbatim_ext: vec![],
            exclude: vec![],
            suffix: "gz".to_string(),
            level: 9,
        };
        let policy = args.to_policy();
        assert_eq!(policy.classify(Path::new("b.bin")), FileClass::Verbatim);
        assert!(policy.is_excluded("mock"));
        assert_eq!(policy.compressed_suffix, "gz");
    }

    #[test]
    fn explicit_sets_replace_defaults_and_dots_are_stripped() {
        let args = PolicyArgs {
            verbatim_ext: vec![".TXT".to_string()],
            exclude: vec!["fixtures".to_string()],
            suffix: ".gzip".to_string(),
            level: 6,
        };
        let policy = args.to_policy();
        assert_eq!(policy.classify(Path::new("a.txt")), FileClass::Verbatim);
        assert_eq!(policy.classify(Path::new("b.bin")), FileClass::Compress);
        assert!(policy.is_excluded("fixtures"));
        assert!(!policy.is_excluded("mock"));
        assert!(policy.is_excluded(".still-hidden"));
        assert_eq!(policy.compressed_suffix, "gzip");
    }
}
