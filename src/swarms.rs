//src/swarms.rs

use ahash::AHashMap;
use regex::Regex;
use std::path::Path;

use crate::error::Result;
use crate::fasta::for_each_line;
use crate::types::Membership;

/// Abundance annotations (`_N` or `;size=N;`) and the space between ids.
const MEMBER_SEPARATOR: &str = "_[0-9]+|;size=[0-9]+;?| ";

/// Splits one swarms line into bare amplicon ids.
///
/// The line is split on [`MEMBER_SEPARATOR`] and every other token is kept:
/// each annotated id produces an empty token between its annotation and the
/// following space. An id containing `_` followed by digits is therefore
/// split too.
pub fn split_members(separator: &Regex, line: &str) -> Vec<String> {
    separator
        .split(line.trim())
        .step_by(2)
        .map(str::to_string)
        .collect()
}

/// Parses a swarms file, one cluster per line, seed first:
/// ```text
/// <seed>;size=N; <member>;size=N; ...
/// <seed>_N <member>_N ...
/// ```
/// A seed appearing on several lines gets one member group per line.
pub fn load_membership(path: &Path) -> Result<Membership> {
    let separator = Regex::new(MEMBER_SEPARATOR).expect("member separator is a valid regex");
    let mut membership: Membership = AHashMap::new();
    let mut lines = 0usize;

    for_each_line(path, |_, line| {
        let members = split_members(&separator, line);
        if let Some(seed) = members.first().cloned() {
            membership.entry(seed).or_default().push(members);
            lines += 1;
        }
        Ok(())
    })?;

    log::info!(
        "Loaded {} clusters ({} lines) from {}",
        membership.len(),
        lines,
        path.display()
    );
    Ok(membership)
}
