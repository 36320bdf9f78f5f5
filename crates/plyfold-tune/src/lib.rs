//! Hyperparameter tuning, selection, and final evaluation
//!
//! The slow half of the pipeline: cross every family's hyperparameter
//! grid with the stratified folds, record one validation ROC AUC per
//! (grid point, fold), and persist the results as write-once artifacts.
//! The fast half ranks those artifacts, picks the best configuration,
//! refits it on the full training partition, and scores the untouched
//! test partition once.
//!
//! # Modules
//!
//! - [`grid`]: the fixed per-family grids (25 / 25 / 25 / 5 points)
//! - [`engine`]: grid point x fold fitting and scoring
//! - [`artifact`]: the versioned persisted tuning result
//! - [`select`]: metric aggregation, ranking, and the tie-break rule
//! - [`evaluate`]: refit on train, score on test

pub mod artifact;
pub mod engine;
pub mod evaluate;
pub mod grid;
pub mod select;
