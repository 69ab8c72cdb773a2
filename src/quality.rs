//src/quality.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::{OtuTableError, Result};
use crate::fasta::for_each_line;
use crate::types::QualityScores;

/// Parses a quality file in the format:
/// ```text
/// <fingerprint> <quality> <length>
/// ```
/// and stores `quality / length` per fingerprint.
pub fn load_quality_scores(path: &Path) -> Result<QualityScores> {
    let mut scores: QualityScores = AHashMap::new();

    for_each_line(path, |line_no, line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [fingerprint, quality, length] = fields[..] else {
            return Err(OtuTableError::parse(
                path,
                line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let quality: f64 = quality.parse().map_err(|_| {
            OtuTableError::parse(path, line_no, format!("invalid quality '{quality}'"))
        })?;
        let length: u64 = length.parse().map_err(|_| {
            OtuTableError::parse(path, line_no, format!("invalid length '{length}'"))
        })?;
        if length == 0 {
            return Err(OtuTableError::parse(path, line_no, "sequence length is zero"));
        }

        scores.insert(fingerprint.to_string(), quality / length as f64);
        Ok(())
    })?;

    log::info!("Loaded {} quality scores from {}", scores.len(), path.display());
    Ok(scores)
}

/// Renders a score with a trailing `.0` on integral values.
pub fn format_quality(score: f64) -> String {
    format!("{score:?}")
}
