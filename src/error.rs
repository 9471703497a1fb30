use std::path::PathBuf;

/// The primary error type for all operations in the `fsprep` crate.
#[derive(Debug)]
pub enum PrepError {
    /// The source root does not exist or is not a directory.
    SourceMissing { path: PathBuf },

    /// An I/O error occurred, typically while reading or writing a file.
    /// Includes the path where the error happened.
    Io { source: std::io::Error, path: PathBuf },

    /// An error occurred when trying to strip the source root prefix from
    /// an enumerated path.
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// Removing the previous destination tree failed during a rebuild.
    /// The destination may have been left partially removed.
    DestinationRemoval { source: std::io::Error, path: PathBuf },
}

impl std::fmt::Display for PrepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrepError::SourceMissing { path } => {
                write!(f, "Source directory '{}' does not exist or is not a directory", path.display())
            }
            PrepError::Io { source, path } => {
                write!(f, "I/O error on path '{}': {}", path.display(), source)
            }
            PrepError::StripPrefix { prefix, path } => {
                write!(f, "Could not strip prefix '{}' from path '{}'", prefix.display(), path.display())
            }
            PrepError::DestinationRemoval { source, path } => {
                write!(f, "Failed to remove destination '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrepError::Io { source, .. } => Some(source),
            PrepError::DestinationRemoval { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PrepError {
    /// Attach a path to a raw I/O error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PrepError::Io { source, path: path.into() }
    }
}

// Generic IO conversion for errors with no meaningful path
impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        PrepError::Io { source: err, path: PathBuf::new() }
    }
}
