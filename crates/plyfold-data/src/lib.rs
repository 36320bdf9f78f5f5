//! Data loading and cleaning for chess game outcome modelling
//!
//! This crate turns a delimited table of per-game move sequences into the
//! immutable, fully-categorical working table the rest of the pipeline
//! consumes.
//!
//! # Input Format
//!
//! One row per game, 41 named columns: 40 ply columns (`ply_1`..`ply_40`,
//! one half-move token each) followed by a `result` column. Header names
//! are normalized on load, so `Ply 1` / `Result` headers work too.
//!
//! # Cleaning Rules
//!
//! Rows are dropped silently (content problems are not errors) when:
//!
//! - the result is a draw, missing, or unparseable, or
//! - any ply column is empty (the game ended before move 20).
//!
//! Surviving move tokens have their notation symbols rewritten to plain
//! word tokens (`Qxf7#` becomes `Qtakesf7mate`) so that every column is a
//! clean categorical variable. See [`rewrite`] for the substitution table.
//!
//! # Categorical Encoding
//!
//! Move tokens form an open vocabulary that grows with the corpus.
//! [`vocab::MoveVocab`] builds one dictionary per ply column from the
//! *training* partition only; tokens unseen at encode time map to an
//! explicit novel level instead of failing.
//!
//! # Examples
//!
//! ```no_run
//! use plyfold_data::loader;
//!
//! let (table, stats) = loader::load_game_table("data.csv")?;
//! println!(
//!     "kept {} of {} games ({} draws/missing, {} incomplete)",
//!     stats.kept, stats.total_rows, stats.dropped_result, stats.dropped_incomplete,
//! );
//! for record in table.records().iter().take(3) {
//!     println!("{:?} {:?}", record.outcome, &record.moves[..4]);
//! }
//! # Ok::<(), plyfold_data::loader::DataError>(())
//! ```

pub mod loader;
pub mod record;
pub mod rewrite;
pub mod vocab;
