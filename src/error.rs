//src/error.rs

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for table building.
pub type Result<T> = std::result::Result<T, OtuTableError>;

/// Every fatal condition the loaders and the table assembler can hit.
#[derive(Error, Debug)]
pub enum OtuTableError {
    /// An input file could not be opened or read.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record does not match the layout its file requires.
    #[error("Malformed line {line} in '{}': {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A sample header without the `;size=N` annotation.
    #[error("Header '{header}' at line {line} in '{}' has no ';size=' annotation", .path.display())]
    MissingSizeAnnotation {
        path: PathBuf,
        line: usize,
        header: String,
    },

    /// A ranked cluster has no membership entry.
    #[error("Cluster seed '{seed}' is listed in the stats file but missing from the swarms file")]
    MissingMembership { seed: String },

    /// Writing the table failed.
    #[error("Cannot write table: {0}")]
    Output(#[from] io::Error),

    #[error("Cannot start worker pool: {0}")]
    ThreadPool(String),
}

impl OtuTableError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        OtuTableError::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn parse(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        OtuTableError::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_file_and_line() {
        let err = OtuTableError::parse(Path::new("run.stats"), 7, "expected at least 4 fields, found 2");
        let msg = format!("{err}");
        assert!(msg.contains("run.stats"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("found 2"));
    }

    #[test]
    fn test_missing_membership_names_seed() {
        let err = OtuTableError::MissingMembership { seed: "a1b2".to_string() };
        assert!(format!("{err}").contains("'a1b2'"));
    }
}
