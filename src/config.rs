//src/config.rs

use std::path::PathBuf;

/// Input files and run options for one table.
///
/// The four optional sources each enable their own output columns:
/// `representatives` adds `length` and `sequence`, `uchime` adds `chimera`,
/// `quality` adds `quality`, `assignments` adds `identity`, `taxonomy` and
/// `references`.
#[derive(Debug, Clone)]
pub struct OtuTableConfig {
    pub sample_files: Vec<PathBuf>,
    pub stats: PathBuf,
    pub swarms: PathBuf,
    pub representatives: Option<PathBuf>,
    pub uchime: Option<PathBuf>,
    pub quality: Option<PathBuf>,
    pub assignments: Option<PathBuf>,
    /// Worker threads used to parse the per-sample files.
    pub threads: usize,
}

impl OtuTableConfig {
    pub fn new(sample_files: Vec<PathBuf>, stats: PathBuf, swarms: PathBuf) -> Self {
        Self {
            sample_files,
            stats,
            swarms,
            representatives: None,
            uchime: None,
            quality: None,
            assignments: None,
            threads: 1,
        }
    }
}
