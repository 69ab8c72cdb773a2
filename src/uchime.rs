//src/uchime.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::Result;
use crate::fasta::for_each_line;
use crate::types::{ChimeraStatus, NOT_AVAILABLE};

/// Column holding `<seed>;size=N;`.
const QUERY_FIELD: usize = 1;
/// Column holding the Y/N/? verdict.
const VERDICT_FIELD: usize = 17;

/// Extracts `(seed, verdict)` from one chimera report line. Returns `None`
/// when the query column is missing; a missing verdict column (unfinished
/// detection run) yields `NA`.
pub fn parse_uchime_line(line: &str) -> Option<(&str, &str)> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    let query = *fields.get(QUERY_FIELD)?;
    let seed = query.split(';').next().unwrap_or_default();
    let verdict = fields.get(VERDICT_FIELD).copied().unwrap_or(NOT_AVAILABLE);
    Some((seed, verdict))
}

/// Parses a tab-separated chimera detection report into `seed -> verdict`.
pub fn load_chimera_status(path: &Path) -> Result<ChimeraStatus> {
    let mut status: ChimeraStatus = AHashMap::new();
    let mut partial = 0usize;

    for_each_line(path, |line_no, line| {
        match parse_uchime_line(line) {
            Some((seed, verdict)) => {
                status.insert(seed.to_string(), verdict.to_string());
            }
            None => {
                log::debug!("{}: skipping partial line {}", path.display(), line_no);
                partial += 1;
            }
        }
        Ok(())
    })?;

    if partial > 0 {
        log::info!("Skipped {} partial line(s) in {}", partial, path.display());
    }
    log::info!("Loaded {} chimera verdicts from {}", status.len(), path.display());
    Ok(status)
}
