use plyfold_data::record::{GameTable, Outcome};
use plyfold_stats::frequency::FrequencyTable;

/// Outcome-class counts and proportions for a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBalance {
    pub white_wins: usize,
    pub black_wins: usize,
    pub white_proportion: f64,
    pub black_proportion: f64,
}

impl ClassBalance {
    #[must_use]
    pub fn from_table(table: &GameTable) -> Self {
        let counts = FrequencyTable::from_values(
            table.records().iter().map(|r| r.outcome.class_index()),
        );
        let white_wins = counts
            .entries()
            .iter()
            .find(|(class, _)| *class == Outcome::WhiteWin.class_index())
            .map_or(0, |(_, count)| *count);
        let black_wins = counts.total() - white_wins;
        Self {
            white_wins,
            black_wins,
            white_proportion: counts.proportion_of(&Outcome::WhiteWin.class_index()),
            black_proportion: counts.proportion_of(&Outcome::BlackWin.class_index()),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.white_wins + self.black_wins
    }
}
