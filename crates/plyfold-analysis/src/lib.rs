//! Descriptive analytics over the cleaned game table
//!
//! Everything here is read-only reporting run before any modelling:
//!
//! - [`class_balance`]: how decisive outcomes are distributed
//! - [`openings`]: uniqueness and frequency of opening prefixes at
//!   increasing ply depth
//! - [`special_moves`]: conditional win rates split by whether a game
//!   contains a given special-move token (`check`, `castle`, `takes`,
//!   `promote`, `mate`)
//!
//! All outputs are plain data; the CLI layer renders them.

pub mod class_balance;
pub mod openings;
pub mod special_moves;
