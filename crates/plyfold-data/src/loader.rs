//! CSV loading and the cleaning pipeline
//!
//! Loading is the only stage with real failure modes: I/O and malformed
//! file structure are surfaced as [`DataError`]. Per-row content problems
//! (draws, missing results, short games) are silent drops counted in
//! [`CleanStats`], per the cleaning rules in the crate docs.

use std::{fs::File, io, path::Path};

use derive_more::{Display, Error, From};

use crate::{
    record::{GameRecord, GameTable, Outcome, PLY_COUNT},
    rewrite::rewrite_token,
};

/// Structural loading errors. Row-content problems are not errors.
#[derive(Debug, Display, Error, From)]
pub enum DataError {
    /// The input file could not be opened or read.
    #[display("failed to read input: {_0}")]
    Io(io::Error),
    /// The delimited structure itself is malformed.
    #[display("failed to parse delimited input: {_0}")]
    Csv(csv::Error),
    /// A required column is absent from the header row.
    #[display("missing required column: {name}")]
    #[from(ignore)]
    MissingColumn { name: String },
}

/// Counts of what cleaning kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Rows in the input file (excluding the header).
    pub total_rows: usize,
    /// Rows that survived cleaning.
    pub kept: usize,
    /// Rows dropped for a drawn, missing, or unparseable result.
    pub dropped_result: usize,
    /// Rows dropped for an empty ply column (game shorter than 40 plies).
    pub dropped_incomplete: usize,
}

/// Loads and cleans a game table from a CSV file.
pub fn load_game_table<P>(path: P) -> Result<(GameTable, CleanStats), DataError>
where
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    load_from_reader(io::BufReader::new(file))
}

/// Loads and cleans a game table from any reader.
///
/// Header names are normalized (lowercased, spaces to underscores) before
/// column lookup, so `Ply 1`/`Result` and `ply_1`/`result` headers are
/// both accepted, in any column order.
pub fn load_from_reader<R>(reader: R) -> Result<(GameTable, CleanStats), DataError>
where
    R: io::Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();

    let ply_columns = (1..=PLY_COUNT)
        .map(|ply| column_index(&headers, &format!("ply_{ply}")))
        .collect::<Result<Vec<_>, _>>()?;
    let result_column = column_index(&headers, "result")?;

    let mut stats = CleanStats::default();
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        stats.total_rows += 1;

        let Some(outcome) = row.get(result_column).and_then(Outcome::parse) else {
            stats.dropped_result += 1;
            continue;
        };

        let Some(moves) = clean_moves(&row, &ply_columns) else {
            stats.dropped_incomplete += 1;
            continue;
        };

        records.push(GameRecord { moves, outcome });
    }
    stats.kept = records.len();

    Ok((GameTable::new(records), stats))
}

/// Extracts and rewrites the 40 move tokens, or `None` if any is missing.
fn clean_moves(row: &csv::StringRecord, ply_columns: &[usize]) -> Option<Vec<String>> {
    let mut moves = Vec::with_capacity(PLY_COUNT);
    for &column in ply_columns {
        let token = row.get(column)?.trim();
        if token.is_empty() {
            return None;
        }
        moves.push(rewrite_token(token));
    }
    Some(moves)
}

fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn column_index(headers: &[String], name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::MissingColumn {
            name: name.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;

    fn full_game(token: &str, result: &str) -> (Vec<String>, String) {
        (vec![token.to_owned(); PLY_COUNT], result.to_owned())
    }

    fn csv_from_games(games: &[(Vec<String>, String)]) -> String {
        let mut input = String::new();
        for ply in 1..=PLY_COUNT {
            let _ = write!(input, "Ply {ply},");
        }
        input.push_str("Result\n");
        for (moves, result) in games {
            for token in moves {
                let _ = write!(input, "{token},");
            }
            let _ = writeln!(input, "{result}");
        }
        input
    }

    #[test]
    fn keeps_complete_decisive_games() {
        let games = vec![full_game("e4", "1-0"), full_game("d4", "0-1")];
        let input = csv_from_games(&games);
        let (table, stats) = load_from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(table.record(0).outcome, Outcome::WhiteWin);
        assert_eq!(table.record(1).outcome, Outcome::BlackWin);
    }

    #[test]
    fn drops_draws_silently() {
        let games = vec![full_game("e4", "1/2-1/2"), full_game("d4", "0-1")];
        let input = csv_from_games(&games);
        let (table, stats) = load_from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(stats.dropped_result, 1);
    }

    #[test]
    fn drops_incomplete_games() {
        let mut short = full_game("e4", "1-0");
        short.0[PLY_COUNT - 1] = String::new();
        let games = vec![short, full_game("d4", "0-1")];
        let input = csv_from_games(&games);
        let (table, stats) = load_from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(stats.dropped_incomplete, 1);
    }

    #[test]
    fn cleaned_records_are_fully_populated_and_rewritten() {
        let games = vec![full_game("Qxf7#", "0-1")];
        let input = csv_from_games(&games);
        let (table, _) = load_from_reader(input.as_bytes()).unwrap();
        let record = table.record(0);
        assert_eq!(record.moves.len(), PLY_COUNT);
        assert!(record.moves.iter().all(|m| m == "Qtakesf7mate"));
    }

    #[test]
    fn result_dashes_are_not_rewritten() {
        // The rewrite table turns `-` into `castle`, but only in move
        // columns. Results must still parse.
        let games = vec![full_game("O-O", "1-0")];
        let input = csv_from_games(&games);
        let (table, _) = load_from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.record(0).outcome, Outcome::WhiteWin);
        assert_eq!(table.record(0).moves[0], "OcastleO");
    }

    #[test]
    fn missing_result_column_is_an_error() {
        let input = "ply_1,ply_2\ne4,e5\n";
        let err = load_from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }
}
