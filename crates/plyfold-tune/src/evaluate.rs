//! Final refit and held-out test evaluation
//!
//! The selected configuration is refit once on the entire training
//! partition and scored exactly once against the untouched test
//! partition. The output is a versioned report carrying the test ROC
//! AUC, the full ROC curve, and the confusion matrix at the 0.5
//! probability threshold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plyfold_data::record::GameTable;
use plyfold_model::{
    family::ModelFamily,
    metrics::{ConfusionMatrix, RocCurve, roc_auc},
};
use plyfold_resample::TrainTestSplit;

use crate::{artifact::SCHEMA_VERSION, engine, grid::GridPoint, select::Selection};

/// Classification threshold for the reported confusion matrix.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// The persisted end product of the pipeline: one model family, one
/// hyperparameter combination, one pass over the test partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Same schema version family as the tuning artifacts.
    pub schema_version: u32,
    /// When the evaluation ran.
    pub created_at: DateTime<Utc>,
    /// The winning family.
    pub family: ModelFamily,
    /// The winning hyperparameter combination.
    pub point: GridPoint,
    /// Mean cross-validated AUC the winner was selected on.
    pub validation_auc: f64,
    /// ROC AUC on the test partition.
    pub test_auc: f64,
    /// ROC curve over the test partition.
    pub roc: RocCurve,
    /// Confusion matrix at [`DECISION_THRESHOLD`].
    pub confusion: ConfusionMatrix,
    /// Rows the final model was fit on.
    pub train_size: usize,
    /// Rows the final model was scored on.
    pub test_size: usize,
}

/// Refits the selection on the full training partition and scores the
/// test partition.
///
/// The test partition's AUC falls back to 0.5 only in the degenerate
/// single-class case, same as fold scoring.
#[must_use]
pub fn evaluate(
    table: &GameTable,
    split: &TrainTestSplit,
    selection: &Selection,
    seed: u64,
) -> FinalReport {
    let scores = engine::fit_and_score(table, &split.train, &split.test, &selection.best.point, seed);
    let labels: Vec<usize> = split
        .test
        .iter()
        .map(|&i| table.record(i).outcome.class_index())
        .collect();

    FinalReport {
        schema_version: SCHEMA_VERSION,
        created_at: Utc::now(),
        family: selection.family,
        point: selection.best.point,
        validation_auc: selection.best.summary.mean,
        test_auc: roc_auc(&labels, &scores).unwrap_or(0.5),
        roc: RocCurve::compute(&labels, &scores),
        confusion: ConfusionMatrix::at_threshold(&labels, &scores, DECISION_THRESHOLD),
        train_size: split.train.len(),
        test_size: split.test.len(),
    }
}
