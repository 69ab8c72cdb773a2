//src/stats.rs

use ahash::AHashMap;
use std::cmp::Ordering;
use std::path::Path;

use crate::error::{OtuTableError, Result};
use crate::fasta::for_each_line;
use crate::types::{ClusterRanking, ClusterStats};

/// Parses a clustering statistics file in the format:
/// ```text
/// <cloud>\t<mass>\t<seed>\t<seed abundance>\t...
/// ```
/// Only the first four fields are used. A seed listed twice keeps its last
/// line.
pub fn load_cluster_stats(path: &Path) -> Result<ClusterRanking> {
    let mut stats: AHashMap<String, ClusterStats> = AHashMap::new();

    for_each_line(path, |line_no, line| {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(OtuTableError::parse(
                path,
                line_no,
                format!("expected at least 4 tab-separated fields, found {}", fields.len()),
            ));
        }

        let number = |idx: usize, name: &str| -> Result<u64> {
            fields[idx].trim().parse().map_err(|_| {
                OtuTableError::parse(path, line_no, format!("invalid {name} '{}'", fields[idx]))
            })
        };
        let cloud = number(0, "cloud size")?;
        let mass = number(1, "mass")?;
        let seed_abundance = number(3, "seed abundance")?;

        stats.insert(
            fields[2].trim().to_string(),
            ClusterStats {
                cloud,
                mass,
                seed_abundance,
            },
        );
        Ok(())
    })?;

    let ranked = rank_seeds(&stats);
    log::info!("Ranked {} clusters from {}", ranked.len(), path.display());

    Ok(ClusterRanking { stats, ranked })
}

/// Descending mass, ties broken by descending seed id.
pub fn compare_clusters(a: (&str, &ClusterStats), b: (&str, &ClusterStats)) -> Ordering {
    b.1.mass.cmp(&a.1.mass).then_with(|| b.0.cmp(a.0))
}

/// Orders every seed of `stats` by rank.
pub fn rank_seeds(stats: &AHashMap<String, ClusterStats>) -> Vec<String> {
    let mut entries: Vec<(&String, &ClusterStats)> = stats.iter().collect();
    entries.sort_by(|a, b| compare_clusters((a.0.as_str(), a.1), (b.0.as_str(), b.1)));
    entries.into_iter().map(|(seed, _)| seed.clone()).collect()
}
