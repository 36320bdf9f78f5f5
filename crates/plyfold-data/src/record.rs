use serde::{Deserialize, Serialize};

/// Number of ply columns per game. Games shorter than 20 full moves are
/// excluded during cleaning, so every retained record has all plies set.
pub const PLY_COUNT: usize = 40;

/// Decisive game outcome. Draws never survive cleaning.
///
/// `BlackWin` is the positive class throughout the pipeline: classifiers
/// score games with the probability assigned to a black win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// White won (`1-0`), encoded as class 0.
    WhiteWin,
    /// Black won (`0-1`), encoded as class 1.
    BlackWin,
}

impl Outcome {
    /// Parses a result-column value. Draws and anything unrecognized map
    /// to `None` and are filtered out upstream.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1-0" => Some(Self::WhiteWin),
            "0-1" => Some(Self::BlackWin),
            _ => None,
        }
    }

    /// The {0, 1} class encoding.
    #[must_use]
    pub fn class_index(self) -> usize {
        match self {
            Self::WhiteWin => 0,
            Self::BlackWin => 1,
        }
    }

    /// The class encoding as a regression target.
    #[must_use]
    pub fn label(self) -> f64 {
        match self {
            Self::WhiteWin => 0.0,
            Self::BlackWin => 1.0,
        }
    }
}

/// A cleaned game: exactly [`PLY_COUNT`] rewritten move tokens plus the
/// decisive outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Rewritten move tokens, ply 1 first (white and black alternate).
    pub moves: Vec<String>,
    /// Who won.
    pub outcome: Outcome,
}

/// The immutable cleaned working table.
///
/// Every pipeline stage takes a `GameTable` (or index subsets of one) and
/// returns new values; nothing mutates the table after cleaning.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    records: Vec<GameRecord>,
}

impl GameTable {
    #[must_use]
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, index: usize) -> &GameRecord {
        &self.records[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Outcomes in row order, as used for stratification.
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.records.iter().map(|r| r.outcome).collect()
    }
}
