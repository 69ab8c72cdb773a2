//src/samples.rs

use ahash::AHashMap;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{OtuTableError, Result};
use crate::fasta::{for_each_header, normalize_header, split_size_annotation};
use crate::types::{AmpliconCounts, SampleAbundances};

/// Sample name of a per-sample file: its base name up to the first '.'.
pub fn sample_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.split('.').next().unwrap_or_default().to_string()
}

/// Reads one per-sample file into `amplicon -> abundance`. An amplicon
/// repeated within the file has its abundances summed.
pub fn read_sample_file(path: &Path) -> Result<AHashMap<String, u64>> {
    let mut counts: AHashMap<String, u64> = AHashMap::new();

    for_each_header(path, |line_no, line| {
        let header = normalize_header(line);
        let (amplicon, size) =
            split_size_annotation(header).ok_or_else(|| OtuTableError::MissingSizeAnnotation {
                path: path.to_path_buf(),
                line: line_no,
                header: header.to_string(),
            })?;
        let abundance: u64 = size.parse().map_err(|_| {
            OtuTableError::parse(path, line_no, format!("invalid abundance '{size}'"))
        })?;
        *counts.entry(amplicon.to_string()).or_insert(0) += abundance;
        Ok(())
    })?;

    log::debug!("{}: {} amplicons", path.display(), counts.len());
    Ok(counts)
}

/// Loads every per-sample file, parsing them on a pool of `threads` workers.
///
/// Files sharing a sample name are merged by summing abundances; the
/// duplicated names are reported with a warning.
pub fn load_sample_abundances(paths: &[PathBuf], threads: usize) -> Result<SampleAbundances> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| OtuTableError::ThreadPool(e.to_string()))?;

    let per_file: Vec<(String, AHashMap<String, u64>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| Ok((sample_name(path), read_sample_file(path)?)))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut files_per_sample: AHashMap<String, usize> = AHashMap::new();
    let mut amplicons: AmpliconCounts = AHashMap::new();

    for (sample, counts) in per_file {
        *files_per_sample.entry(sample.clone()).or_insert(0) += 1;
        for (amplicon, abundance) in counts {
            *amplicons
                .entry(amplicon)
                .or_default()
                .entry(sample.clone())
                .or_insert(0) += abundance;
        }
    }

    let mut duplicates: Vec<String> = files_per_sample
        .iter()
        .filter(|&(_, &n)| n > 1)
        .map(|(sample, _)| sample.clone())
        .collect();
    duplicates.sort();
    if !duplicates.is_empty() {
        log::warn!(
            "Some samples are duplicated, their abundances are summed: {}",
            duplicates.join(", ")
        );
    }

    // Column order does not depend on file order.
    let mut samples: Vec<String> = files_per_sample.keys().cloned().collect();
    samples.sort();

    log::info!(
        "Loaded {} amplicons from {} sample file(s) ({} samples)",
        amplicons.len(),
        paths.len(),
        samples.len()
    );

    Ok(SampleAbundances {
        amplicons,
        samples,
        duplicates,
    })
}
