//! Conditional win rates by special-move occurrence
//!
//! After rewriting, special moves are plain substrings of the move
//! tokens, so "did black win more often in games with a check?" becomes
//! a substring scan over the 40 columns.

use plyfold_data::record::{GameRecord, GameTable, Outcome};

/// The rewritten special-move words worth reporting on.
pub const SPECIAL_WORDS: [&str; 5] = ["check", "castle", "promote", "takes", "mate"];

/// Black-win rate split by whether games contain a token word.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalWinRate {
    /// The rewritten word tested for (e.g. `check`).
    pub word: String,
    /// Games containing the word.
    pub with_count: usize,
    /// Black-win rate among games containing the word.
    pub with_black_win_rate: f64,
    /// Games not containing the word.
    pub without_count: usize,
    /// Black-win rate among games not containing the word.
    pub without_black_win_rate: f64,
}

/// Computes the conditional win rate for one word.
#[must_use]
pub fn conditional_win_rate(table: &GameTable, word: &str) -> ConditionalWinRate {
    let (with, without): (Vec<&GameRecord>, Vec<&GameRecord>) = table
        .records()
        .iter()
        .partition(|record| contains_word(record, word));
    ConditionalWinRate {
        word: word.to_owned(),
        with_count: with.len(),
        with_black_win_rate: black_win_rate(&with),
        without_count: without.len(),
        without_black_win_rate: black_win_rate(&without),
    }
}

/// Computes conditional win rates for every word in [`SPECIAL_WORDS`].
#[must_use]
pub fn all_conditional_win_rates(table: &GameTable) -> Vec<ConditionalWinRate> {
    SPECIAL_WORDS
        .iter()
        .map(|word| conditional_win_rate(table, word))
        .collect()
}

fn contains_word(record: &GameRecord, word: &str) -> bool {
    record.moves.iter().any(|token| token.contains(word))
}

#[expect(clippy::cast_precision_loss)]
fn black_win_rate(records: &[&GameRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let black = records
        .iter()
        .filter(|r| r.outcome == Outcome::BlackWin)
        .count();
    black as f64 / records.len() as f64
}

#[cfg(test)]
mod tests {
    use plyfold_data::record::PLY_COUNT;

    use super::*;

    fn game(token: &str, outcome: Outcome) -> GameRecord {
        let mut moves = vec!["e4".to_owned(); PLY_COUNT];
        moves[5] = token.to_owned();
        GameRecord { moves, outcome }
    }

    #[test]
    fn splits_by_word_occurrence() {
        let table = GameTable::new(vec![
            game("Qtakesf7mate", Outcome::BlackWin),
            game("Qtakesf7mate", Outcome::WhiteWin),
            game("Nf3", Outcome::WhiteWin),
            game("Nf3", Outcome::WhiteWin),
        ]);
        let rate = conditional_win_rate(&table, "mate");
        assert_eq!(rate.with_count, 2);
        assert!((rate.with_black_win_rate - 0.5).abs() < 1e-12);
        assert_eq!(rate.without_count, 2);
        assert_eq!(rate.without_black_win_rate, 0.0);
    }

    #[test]
    fn covers_all_special_words() {
        let table = GameTable::new(vec![game("e4check", Outcome::BlackWin)]);
        let rates = all_conditional_win_rates(&table);
        assert_eq!(rates.len(), SPECIAL_WORDS.len());
        assert_eq!(rates[0].word, "check");
        assert_eq!(rates[0].with_count, 1);
    }

    #[test]
    fn empty_groups_report_zero() {
        let table = GameTable::new(vec![game("Nf3", Outcome::WhiteWin)]);
        let rate = conditional_win_rate(&table, "promote");
        assert_eq!(rate.with_count, 0);
        assert_eq!(rate.with_black_win_rate, 0.0);
    }
}
