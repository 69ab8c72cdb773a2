//src/table.rs

use std::io::Write;

use crate::error::{OtuTableError, Result};
use crate::quality::format_quality;
use crate::types::{
    Assignment, Assignments, ChimeraStatus, ClusterRanking, ClusterStats, Membership,
    QualityScores, Representatives, SampleAbundances, TableSummary, NOT_AVAILABLE,
};

/// Metadata columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Otu,
    Total,
    Cloud,
    Amplicon,
    Length,
    Abundance,
    Chimera,
    Spread,
    Quality,
    Sequence,
    Identity,
    Taxonomy,
    References,
}

pub const ALL_COLUMNS: [Column; 13] = [
    Column::Otu,
    Column::Total,
    Column::Cloud,
    Column::Amplicon,
    Column::Length,
    Column::Abundance,
    Column::Chimera,
    Column::Spread,
    Column::Quality,
    Column::Sequence,
    Column::Identity,
    Column::Taxonomy,
    Column::References,
];

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Otu => "OTU",
            Column::Total => "total",
            Column::Cloud => "cloud",
            Column::Amplicon => "amplicon",
            Column::Length => "length",
            Column::Abundance => "abundance",
            Column::Chimera => "chimera",
            Column::Spread => "spread",
            Column::Quality => "quality",
            Column::Sequence => "sequence",
            Column::Identity => "identity",
            Column::Taxonomy => "taxonomy",
            Column::References => "references",
        }
    }
}

/// Everything the loaders produced. `None` marks an optional source that
/// was not supplied.
#[derive(Debug, Default)]
pub struct TableInputs {
    pub abundances: SampleAbundances,
    pub ranking: ClusterRanking,
    pub membership: Membership,
    pub representatives: Option<Representatives>,
    pub chimeras: Option<ChimeraStatus>,
    pub quality: Option<QualityScores>,
    pub assignments: Option<Assignments>,
}

impl TableInputs {
    pub fn representative(&self, seed: &str) -> Option<&str> {
        self.representatives.as_ref()?.get(seed).map(String::as_str)
    }

    pub fn chimera(&self, seed: &str) -> Option<&str> {
        self.chimeras.as_ref()?.get(seed).map(String::as_str)
    }

    pub fn quality(&self, seed: &str) -> Option<f64> {
        self.quality.as_ref()?.get(seed).copied()
    }

    pub fn assignment(&self, seed: &str) -> Option<&Assignment> {
        self.assignments.as_ref()?.get(seed)
    }
}

/// The columns of one table, fixed before the first row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<Column>,
    samples: Vec<String>,
}

impl TableSchema {
    /// Keeps each optional column only when its source was loaded.
    pub fn new(inputs: &TableInputs) -> Self {
        let columns = ALL_COLUMNS
            .iter()
            .copied()
            .filter(|column| match column {
                Column::Length | Column::Sequence => inputs.representatives.is_some(),
                Column::Chimera => inputs.chimeras.is_some(),
                Column::Quality => inputs.quality.is_some(),
                Column::Identity | Column::Taxonomy | Column::References => {
                    inputs.assignments.is_some()
                }
                _ => true,
            })
            .collect();

        Self {
            columns,
            samples: inputs.abundances.samples.clone(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn header(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name())
            .chain(self.samples.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\t")
    }

    /// One tab-separated line for `row`, missing lookups rendered as `NA`.
    pub fn render(&self, row: &OtuRow) -> String {
        let mut cells: Vec<String> = Vec::with_capacity(self.columns.len() + row.occurrences.len());

        for column in &self.columns {
            let cell = match column {
                Column::Otu => row.rank.to_string(),
                Column::Total => row.stats.mass.to_string(),
                Column::Cloud => row.stats.cloud.to_string(),
                Column::Amplicon => row.seed.to_string(),
                Column::Length => or_na(row.sequence.map(|s| s.len())),
                Column::Abundance => row.stats.seed_abundance.to_string(),
                Column::Chimera => or_na(row.chimera),
                Column::Spread => row.spread.to_string(),
                Column::Quality => or_na(row.quality.map(format_quality)),
                Column::Sequence => or_na(row.sequence),
                Column::Identity => or_na(row.assignment.map(|a| &a.identity)),
                Column::Taxonomy => or_na(row.assignment.map(|a| &a.taxonomy)),
                Column::References => or_na(row.assignment.map(|a| &a.references)),
            };
            cells.push(cell);
        }
        cells.extend(row.occurrences.iter().map(|n| n.to_string()));

        cells.join("\t")
    }
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One assembled OTU.
#[derive(Debug, Clone, PartialEq)]
pub struct OtuRow<'a> {
    /// 1-based rank position.
    pub rank: usize,
    pub seed: &'a str,
    pub stats: ClusterStats,
    /// Per-sample occurrence, in schema sample order.
    pub occurrences: Vec<u64>,
    /// Number of samples with a non-zero occurrence.
    pub spread: usize,
    pub sequence: Option<&'a str>,
    pub chimera: Option<&'a str>,
    pub quality: Option<f64>,
    pub assignment: Option<&'a Assignment>,
}

/// Sums, per sample, the abundances of every amplicon of every group.
pub fn occurrences(groups: &[Vec<String>], abundances: &SampleAbundances) -> Vec<u64> {
    abundances
        .samples
        .iter()
        .map(|sample| {
            groups
                .iter()
                .flatten()
                .map(|amplicon| abundances.abundance(amplicon, sample))
                .sum()
        })
        .collect()
}

/// Assembles the row of `seed` at rank position `rank`.
pub fn build_row<'a>(inputs: &'a TableInputs, rank: usize, seed: &'a str) -> Result<OtuRow<'a>> {
    let missing = || OtuTableError::MissingMembership {
        seed: seed.to_string(),
    };
    let stats = *inputs.ranking.stats.get(seed).ok_or_else(missing)?;
    let groups = inputs.membership.get(seed).ok_or_else(missing)?;

    let occurrences = occurrences(groups, &inputs.abundances);
    let spread = occurrences.iter().filter(|&&n| n > 0).count();

    Ok(OtuRow {
        rank,
        seed,
        stats,
        occurrences,
        spread,
        sequence: inputs.representative(seed),
        chimera: inputs.chimera(seed),
        quality: inputs.quality(seed),
        assignment: inputs.assignment(seed),
    })
}

/// Writes the header, then one row per cluster in rank order.
pub fn write_table<W: Write>(inputs: &TableInputs, mut out: W) -> Result<TableSummary> {
    let schema = TableSchema::new(inputs);
    writeln!(out, "{}", schema.header())?;

    for (i, seed) in inputs.ranking.ranked.iter().enumerate() {
        let row = build_row(inputs, i + 1, seed)?;
        writeln!(out, "{}", schema.render(&row))?;
    }
    out.flush()?;

    log::info!(
        "Wrote {} OTUs over {} samples",
        inputs.ranking.ranked.len(),
        schema.samples().len()
    );
    Ok(TableSummary {
        otus: inputs.ranking.ranked.len(),
        samples: schema.samples().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn stats(cloud: u64, mass: u64, seed_abundance: u64) -> ClusterStats {
        ClusterStats {
            cloud,
            mass,
            seed_abundance,
        }
    }

    /// Two clusters over samples s1/s2; A = {A, B, C}, D = {D}.
    fn inputs() -> TableInputs {
        let mut amplicons = AHashMap::new();
        for (amplicon, sample, n) in [("A", "s1", 4u64), ("B", "s2", 3), ("C", "s2", 3), ("D", "s1", 2)] {
            amplicons
                .entry(amplicon.to_string())
                .or_insert_with(AHashMap::new)
                .insert(sample.to_string(), n);
        }

        let mut ranking = ClusterRanking::default();
        ranking.stats.insert("A".to_string(), stats(3, 10, 7));
        ranking.stats.insert("D".to_string(), stats(1, 2, 2));
        ranking.ranked = vec!["A".to_string(), "D".to_string()];

        let mut membership = AHashMap::new();
        membership.insert(
            "A".to_string(),
            vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]],
        );
        membership.insert("D".to_string(), vec![vec!["D".to_string()]]);

        TableInputs {
            abundances: SampleAbundances {
                amplicons,
                samples: vec!["s1".to_string(), "s2".to_string()],
                duplicates: Vec::new(),
            },
            ranking,
            membership,
            ..TableInputs::default()
        }
    }

    fn render_table(inputs: &TableInputs) -> Vec<String> {
        let mut out = Vec::new();
        write_table(inputs, &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_minimal_table() {
        let lines = render_table(&inputs());
        assert_eq!(
            lines,
            vec![
                "OTU\ttotal\tcloud\tamplicon\tabundance\tspread\ts1\ts2",
                "1\t10\t3\tA\t7\t2\t4\t6",
                "2\t2\t1\tD\t2\t1\t2\t0",
            ]
        );
    }

    #[test]
    fn test_all_optional_columns() {
        let mut inputs = inputs();
        inputs.representatives = Some(AHashMap::from_iter([("A".to_string(), "ACGT".to_string())]));
        inputs.chimeras = Some(AHashMap::from_iter([("A".to_string(), "N".to_string())]));
        inputs.quality = Some(AHashMap::from_iter([("D".to_string(), 0.5)]));
        inputs.assignments = Some(AHashMap::from_iter([(
            "A".to_string(),
            Assignment {
                identity: "99.0".to_string(),
                taxonomy: "Eukaryota".to_string(),
                references: "X1".to_string(),
            },
        )]));

        let lines = render_table(&inputs);
        assert_eq!(
            lines[0],
            "OTU\ttotal\tcloud\tamplicon\tlength\tabundance\tchimera\tspread\tquality\tsequence\tidentity\ttaxonomy\treferences\ts1\ts2"
        );
        assert_eq!(lines[1], "1\t10\t3\tA\t4\t7\tN\t2\tNA\tACGT\t99.0\tEukaryota\tX1\t4\t6");
        assert_eq!(lines[2], "2\t2\t1\tD\tNA\t2\tNA\t1\t0.5\tNA\tNA\tNA\tNA\t2\t0");
    }

    #[test]
    fn test_dropping_a_source_removes_only_its_column() {
        let mut with_quality = inputs();
        with_quality.quality = Some(AHashMap::from_iter([("A".to_string(), 1.0)]));
        let full = render_table(&with_quality);
        let reduced = render_table(&inputs());

        let quality_idx = full[0].split('\t').position(|c| c == "quality").unwrap();
        for (f, r) in full.iter().zip(&reduced) {
            let mut cells: Vec<&str> = f.split('\t').collect();
            cells.remove(quality_idx);
            assert_eq!(cells.join("\t"), *r);
        }
    }

    #[test]
    fn test_groups_are_all_counted() {
        let mut inputs = inputs();
        inputs
            .membership
            .get_mut("D")
            .unwrap()
            .push(vec!["B".to_string()]);

        let row = build_row(&inputs, 2, "D").unwrap();
        assert_eq!(row.occurrences, vec![2, 3]);
        assert_eq!(row.spread, 2);
    }

    #[test]
    fn test_unknown_member_counts_zero() {
        let groups = vec![vec!["A".to_string(), "nowhere".to_string()]];
        assert_eq!(occurrences(&groups, &inputs().abundances), vec![4, 0]);
    }

    #[test]
    fn test_missing_membership_is_fatal() {
        let mut inputs = inputs();
        inputs.membership.remove("D");

        let mut out = Vec::new();
        let err = write_table(&inputs, &mut out).unwrap_err();
        assert!(matches!(err, OtuTableError::MissingMembership { ref seed } if seed == "D"));
    }
}
