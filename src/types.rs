//src/types.rs

use ahash::AHashMap;

/// Marker written in place of a value an optional source does not provide.
pub const NOT_AVAILABLE: &str = "NA";

/// sample name -> abundance, for one amplicon.
pub type SampleCounts = AHashMap<String, u64>;

/// amplicon id -> per-sample abundances.
pub type AmpliconCounts = AHashMap<String, SampleCounts>;

/// Per-sample abundances of every amplicon, plus the sorted sample names.
#[derive(Debug, Clone, Default)]
pub struct SampleAbundances {
    pub amplicons: AmpliconCounts,
    /// Distinct sample names, sorted lexicographically.
    pub samples: Vec<String>,
    /// Sample names derived from more than one file, sorted.
    pub duplicates: Vec<String>,
}

impl SampleAbundances {
    /// Abundance of `amplicon` in `sample`, 0 when never observed.
    pub fn abundance(&self, amplicon: &str, sample: &str) -> u64 {
        self.amplicons
            .get(amplicon)
            .and_then(|counts| counts.get(sample))
            .copied()
            .unwrap_or(0)
    }
}

/// One line of the clustering statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterStats {
    pub cloud: u64,
    pub mass: u64,
    pub seed_abundance: u64,
}

/// Cluster statistics keyed by seed, with the seeds in rank order.
#[derive(Debug, Clone, Default)]
pub struct ClusterRanking {
    pub stats: AHashMap<String, ClusterStats>,
    /// Seeds by descending mass, then descending seed id.
    pub ranked: Vec<String>,
}

/// seed -> groups of member amplicon ids (one group per swarms line).
pub type Membership = AHashMap<String, Vec<Vec<String>>>;

/// seed -> chimera verdict.
pub type ChimeraStatus = AHashMap<String, String>;

/// fingerprint -> quality / length.
pub type QualityScores = AHashMap<String, f64>;

/// seed -> representative sequence.
pub type Representatives = AHashMap<String, String>;

/// Taxonomic assignment of one amplicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub identity: String,
    pub taxonomy: String,
    pub references: String,
}

/// amplicon id -> assignment.
pub type Assignments = AHashMap<String, Assignment>;

/// Outcome of a table run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub otus: usize,
    pub samples: usize,
}
