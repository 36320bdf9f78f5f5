//! Opening-prefix analytics
//!
//! A d-ply prefix is the first d move tokens of a game joined with
//! spaces. Two questions get answered per depth: how quickly do games
//! become unique (distinct-prefix ratio), and which openings dominate
//! (frequency table).

use plyfold_data::record::GameTable;
use plyfold_stats::frequency::FrequencyTable;

/// Distinct-prefix counts at one ply depth.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixUniqueness {
    /// Prefix length in plies.
    pub depth: usize,
    /// Number of distinct prefixes at this depth.
    pub distinct: usize,
    /// `distinct / games`; 1.0 means every game is already unique.
    pub uniqueness_ratio: f64,
}

/// Computes uniqueness at each requested depth.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn prefix_uniqueness(table: &GameTable, depths: &[usize]) -> Vec<PrefixUniqueness> {
    depths
        .iter()
        .map(|&depth| {
            let prefixes = prefix_table(table, depth);
            let distinct = prefixes.distinct();
            let ratio = if table.is_empty() {
                0.0
            } else {
                distinct as f64 / table.len() as f64
            };
            PrefixUniqueness {
                depth,
                distinct,
                uniqueness_ratio: ratio,
            }
        })
        .collect()
}

/// Frequency table of d-ply opening prefixes, most common first.
#[must_use]
pub fn prefix_table(table: &GameTable, depth: usize) -> FrequencyTable<String> {
    FrequencyTable::from_values(
        table
            .records()
            .iter()
            .map(|record| record.moves[..depth.min(record.moves.len())].join(" ")),
    )
}
