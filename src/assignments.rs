//src/assignments.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::{OtuTableError, Result};
use crate::fasta::for_each_line;
use crate::types::{Assignment, Assignments};

/// Parses a taxonomic assignment file in the format:
/// ```text
/// <amplicon>\t<abundance>\t<identity>\t<taxonomy>\t<references>
/// ```
/// Every line must have exactly five fields.
pub fn load_assignments(path: &Path) -> Result<Assignments> {
    let mut assignments: Assignments = AHashMap::new();

    for_each_line(path, |line_no, line| {
        let fields: Vec<&str> = line.split('\t').collect();
        let [amplicon, _abundance, identity, taxonomy, references] = fields[..] else {
            return Err(OtuTableError::parse(
                path,
                line_no,
                format!("expected 5 tab-separated fields, found {}", fields.len()),
            ));
        };

        assignments.insert(
            amplicon.to_string(),
            Assignment {
                identity: identity.to_string(),
                taxonomy: taxonomy.to_string(),
                references: references.to_string(),
            },
        );
        Ok(())
    })?;

    log::info!("Loaded {} assignments from {}", assignments.len(), path.display());
    Ok(assignments)
}
