//! Statistical utilities for the plyfold pipeline.
//!
//! This crate provides the small set of generic statistics the rest of the
//! workspace needs:
//!
//! - **Metric summaries**: mean, standard deviation, and standard error
//!   over a set of per-fold metric values
//! - **Frequency tables**: deterministic most-common-first counting for
//!   categorical data
//!
//! # Modules
//!
//! - [`summary`]: Aggregation of resampled metric values
//! - [`frequency`]: Frequency tables with a stable ordering
//!
//! # Examples
//!
//! ## Summarizing fold metrics
//!
//! ```
//! use plyfold_stats::summary::MetricSummary;
//!
//! let fold_aucs = [0.71, 0.74, 0.69, 0.72, 0.70];
//! let summary = MetricSummary::new(fold_aucs).unwrap();
//! assert!((summary.mean - 0.712).abs() < 1e-9);
//! assert_eq!(summary.n, 5);
//! ```
//!
//! ## Counting opening prefixes
//!
//! ```
//! use plyfold_stats::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::from_values(["e4", "d4", "e4", "c4"]);
//! assert_eq!(table.entries()[0], ("e4", 2));
//! assert_eq!(table.distinct(), 3);
//! ```

pub mod frequency;
pub mod summary;
