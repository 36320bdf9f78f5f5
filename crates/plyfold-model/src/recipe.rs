//! Indicator expansion of categorical columns
//!
//! The indicator recipe turns each (column, level) pair of the training
//! vocabulary into one binary feature. A game activates exactly one
//! feature per ply column, so rows are stored sparse: the sorted list of
//! active feature indices. The novel level of every column gets a feature
//! too, which is how unseen test-time tokens stay representable.

use plyfold_data::vocab::{EncodedGame, MoveVocab};

/// Maps encoded games onto a fixed indicator feature space.
#[derive(Debug, Clone)]
pub struct IndicatorEncoder {
    offsets: Vec<usize>,
    dim: usize,
}

impl IndicatorEncoder {
    /// Builds the feature space from a training vocabulary.
    #[must_use]
    pub fn new(vocab: &MoveVocab) -> Self {
        let mut offsets = Vec::new();
        let mut dim = 0;
        for column in 0..plyfold_data::record::PLY_COUNT {
            offsets.push(dim);
            dim += vocab.column(column).level_count();
        }
        Self { offsets, dim }
    }

    /// Width of the expanded feature space.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Expands one encoded game to its active indicator indices.
    #[must_use]
    pub fn encode(&self, game: &EncodedGame) -> SparseRow {
        let active = game
            .levels
            .iter()
            .enumerate()
            .map(|(column, &level)| self.offsets[column] + level as usize)
            .collect();
        SparseRow { active }
    }

    /// Expands a batch of games.
    #[must_use]
    pub fn encode_all(&self, games: &[EncodedGame]) -> Vec<SparseRow> {
        games.iter().map(|g| self.encode(g)).collect()
    }
}

/// One game in indicator space: the sorted indices of its active features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseRow {
    /// Active feature indices, ascending (one per ply column).
    pub active: Vec<usize>,
}

impl SparseRow {
    /// Whether the given indicator feature is active.
    #[must_use]
    pub fn has(&self, feature: usize) -> bool {
        self.active.binary_search(&feature).is_ok()
    }
}
