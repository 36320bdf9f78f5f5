//! Per-column categorical vocabularies
//!
//! Move tokens form an open category set: the number of distinct tokens
//! grows with the corpus. The vocabulary is therefore built exactly once,
//! from the training partition only, and every later encode of an unseen
//! token maps to the reserved [`NOVEL_LEVEL`] instead of failing. Test-set
//! games with openings the training set never produced still encode.
//!
//! Level identifiers are assigned in first-occurrence order, so the same
//! training rows in the same order always produce the same vocabulary.

use std::collections::HashMap;

use crate::record::{GameRecord, GameTable, PLY_COUNT};

/// Level index reserved for tokens unseen in the training partition.
pub const NOVEL_LEVEL: u32 = 0;

/// Dictionary for one ply column.
#[derive(Debug, Clone, Default)]
pub struct ColumnVocab {
    index: HashMap<String, u32>,
}

impl ColumnVocab {
    fn insert(&mut self, token: &str) {
        if !self.index.contains_key(token) {
            // Level 0 is the novel token, so known levels start at 1.
            let level = u32::try_from(self.index.len() + 1).unwrap();
            self.index.insert(token.to_owned(), level);
        }
    }

    /// Number of levels including the novel level.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.index.len() + 1
    }

    /// Maps a token to its level, or [`NOVEL_LEVEL`] if unseen.
    #[must_use]
    pub fn level_of(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(NOVEL_LEVEL)
    }
}

/// Categorical dictionaries for all [`PLY_COUNT`] columns.
#[derive(Debug, Clone)]
pub struct MoveVocab {
    columns: Vec<ColumnVocab>,
}

impl MoveVocab {
    /// Builds per-column dictionaries from training records.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a GameRecord>,
    {
        let mut columns = vec![ColumnVocab::default(); PLY_COUNT];
        for record in records {
            for (column, token) in columns.iter_mut().zip(&record.moves) {
                column.insert(token);
            }
        }
        Self { columns }
    }

    /// Builds the vocabulary from a subset of table rows, as used when a
    /// fold's training subset defines the dictionary.
    #[must_use]
    pub fn from_table_indices(table: &GameTable, indices: &[usize]) -> Self {
        Self::from_records(indices.iter().map(|&i| table.record(i)))
    }

    #[must_use]
    pub fn column(&self, index: usize) -> &ColumnVocab {
        &self.columns[index]
    }

    /// Total level count across columns: the width of the full indicator
    /// expansion.
    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.columns.iter().map(ColumnVocab::level_count).sum()
    }

    /// Encodes a record to one level per column. Never fails: unseen
    /// tokens become the novel level.
    #[must_use]
    pub fn encode(&self, record: &GameRecord) -> EncodedGame {
        let levels = self
            .columns
            .iter()
            .zip(&record.moves)
            .map(|(column, token)| column.level_of(token))
            .collect();
        EncodedGame { levels }
    }
}

/// A record encoded to categorical levels, one per ply column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedGame {
    /// Level index per column; 0 is the novel level.
    pub levels: Vec<u32>,
}
