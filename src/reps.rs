//src/reps.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::Result;
use crate::fasta::{normalize_header, read_fasta_records, SIZE_SEPARATOR};
use crate::types::Representatives;

/// Maps each seed of a representatives FASTA to its sequence. The size
/// annotation is optional here; everything before it is the seed id.
pub fn load_representatives(path: &Path) -> Result<Representatives> {
    let mut reps: Representatives = AHashMap::new();

    for record in read_fasta_records(path)? {
        let header = normalize_header(&record.header);
        let seed = header.split(SIZE_SEPARATOR).next().unwrap_or_default();
        reps.insert(seed.to_string(), record.seq);
    }

    log::info!("Loaded {} representative sequences from {}", reps.len(), path.display());
    Ok(reps)
}
