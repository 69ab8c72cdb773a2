// src/lib.rs
pub mod assignments;
pub mod config;
pub mod error;
pub mod fasta;
pub mod quality;
pub mod reps;
pub mod samples;
pub mod stats;
pub mod swarms;
pub mod table;
pub mod types;
pub mod uchime;

use std::io::Write;
use std::path::Path;

pub use crate::config::OtuTableConfig;
pub use crate::error::{OtuTableError, Result};
pub use crate::table::{write_table, TableInputs, TableSchema};
pub use crate::types::TableSummary;

use crate::assignments::load_assignments;
use crate::quality::load_quality_scores;
use crate::reps::load_representatives;
use crate::samples::load_sample_abundances;
use crate::stats::load_cluster_stats;
use crate::swarms::load_membership;
use crate::uchime::load_chimera_status;

/// Runs a loader only when its optional input was given.
fn load_optional<T>(
    path: Option<&Path>,
    loader: impl FnOnce(&Path) -> Result<T>,
) -> Result<Option<T>> {
    path.map(loader).transpose()
}

/// Runs every loader named by `config`.
pub fn load_inputs(config: &OtuTableConfig) -> Result<TableInputs> {
    // 1. Optional per-seed annotations
    let representatives = load_optional(config.representatives.as_deref(), load_representatives)?;

    // 2. Clustering outputs
    let ranking = load_cluster_stats(&config.stats)?;
    let membership = load_membership(&config.swarms)?;

    let chimeras = load_optional(config.uchime.as_deref(), load_chimera_status)?;
    let quality = load_optional(config.quality.as_deref(), load_quality_scores)?;
    let assignments = load_optional(config.assignments.as_deref(), load_assignments)?;

    // 3. Per-sample abundances
    let abundances = load_sample_abundances(&config.sample_files, config.threads)?;

    Ok(TableInputs {
        abundances,
        ranking,
        membership,
        representatives,
        chimeras,
        quality,
        assignments,
    })
}

/// Loads all inputs of `config` and writes the OTU table to `out`.
pub fn build_otu_table<W: Write>(config: &OtuTableConfig, out: W) -> Result<TableSummary> {
    let inputs = load_inputs(config)?;
    write_table(&inputs, out)
}
