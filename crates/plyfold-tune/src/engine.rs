//! The tuning engine
//!
//! Evaluates one grid point against one resampling fold: build the
//! vocabulary from the fold's training subset, encode both subsets, fit
//! the family's model, and score ROC AUC on the held-out subset. The
//! full run crosses every grid point with every fold, which is the slow
//! batch stage the artifacts decouple from reporting.
//!
//! Fit seeds are derived per (seed, grid index, fold) so a tuning run is
//! a pure function of the data, the plan, and one seed.

use serde::{Deserialize, Serialize};

use plyfold_data::{record::GameTable, vocab::MoveVocab};
use plyfold_model::{
    boost::BoostedTreesConfig,
    family::ModelFamily,
    forest::RandomForestConfig,
    logistic::ElasticNetLogistic,
    metrics::roc_auc,
    recipe::IndicatorEncoder,
    svm::LinearSvmConfig,
};
use plyfold_resample::Folds;

use crate::grid::{self, GridPoint};

/// Per-fold validation metrics for one grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPointResult {
    /// The hyperparameter combination evaluated.
    pub point: GridPoint,
    /// One validation ROC AUC per fold, in fold order.
    pub fold_metrics: Vec<f64>,
}

/// A tuning run over one family's grid.
#[derive(Debug)]
pub struct TuningRun<'a> {
    table: &'a GameTable,
    folds: &'a Folds,
    seed: u64,
}

impl<'a> TuningRun<'a> {
    #[must_use]
    pub fn new(table: &'a GameTable, folds: &'a Folds, seed: u64) -> Self {
        Self { table, folds, seed }
    }

    /// Evaluates the family's full grid against every fold.
    ///
    /// `progress` is called once per completed grid point with (index,
    /// grid size); the CLI uses it for status lines.
    #[must_use]
    pub fn evaluate_family<F>(&self, family: ModelFamily, mut progress: F) -> Vec<GridPointResult>
    where
        F: FnMut(usize, usize),
    {
        let grid = grid::grid_for(family);
        let grid_size = grid.len();
        grid.into_iter()
            .enumerate()
            .map(|(grid_index, point)| {
                let fold_metrics = (0..self.folds.k())
                    .map(|fold| {
                        let train = self.folds.training(fold);
                        let validation = self.folds.validation(fold);
                        let seed = derive_seed(self.seed, grid_index, fold);
                        let scores = fit_and_score(self.table, &train, &validation, &point, seed);
                        validation_auc(self.table, &validation, &scores)
                    })
                    .collect();
                progress(grid_index + 1, grid_size);
                GridPointResult {
                    point,
                    fold_metrics,
                }
            })
            .collect()
    }
}

/// Fits `point` on the `train` rows and returns positive-class scores
/// for the `eval` rows. The vocabulary comes from the `train` rows only,
/// so held-out games with unseen tokens hit the novel level.
#[must_use]
pub fn fit_and_score(
    table: &GameTable,
    train: &[usize],
    eval: &[usize],
    point: &GridPoint,
    seed: u64,
) -> Vec<f64> {
    let vocab = MoveVocab::from_table_indices(table, train);
    let train_encoded: Vec<_> = train
        .iter()
        .map(|&i| vocab.encode(table.record(i)))
        .collect();
    let eval_encoded: Vec<_> = eval
        .iter()
        .map(|&i| vocab.encode(table.record(i)))
        .collect();
    let labels: Vec<f64> = train.iter().map(|&i| table.record(i).outcome.label()).collect();

    match point {
        GridPoint::LogisticRegression(p) => {
            let encoder = IndicatorEncoder::new(&vocab);
            let rows = encoder.encode_all(&train_encoded);
            let config = ElasticNetLogistic {
                penalty: p.penalty,
                mixture: p.mixture,
                ..Default::default()
            };
            let model = config.fit(&rows, &labels, encoder.dim());
            eval_encoded
                .iter()
                .map(|g| model.predict_proba(&encoder.encode(g)))
                .collect()
        }
        GridPoint::RandomForest(p) => {
            let encoder = IndicatorEncoder::new(&vocab);
            let rows = encoder.encode_all(&train_encoded);
            let config = RandomForestConfig {
                trees: p.trees,
                mtry: p.mtry,
                min_n: p.min_n,
                seed,
            };
            let model = config.fit(&rows, &labels, encoder.dim());
            eval_encoded
                .iter()
                .map(|g| model.predict_proba(&encoder.encode(g)))
                .collect()
        }
        GridPoint::BoostedTrees(p) => {
            let encoder = IndicatorEncoder::new(&vocab);
            let rows = encoder.encode_all(&train_encoded);
            let config = BoostedTreesConfig {
                trees: p.trees,
                mtry: p.mtry,
                learn_rate: p.learn_rate,
                seed,
            };
            let model = config.fit(&rows, &labels, encoder.dim());
            eval_encoded
                .iter()
                .map(|g| model.predict_proba(&encoder.encode(g)))
                .collect()
        }
        GridPoint::LinearSvm(p) => {
            // identity recipe: the SVM expands internally
            let config = LinearSvmConfig {
                cost: p.cost,
                degree: p.degree,
                seed,
                ..Default::default()
            };
            let model = config.fit(&train_encoded, &labels);
            eval_encoded.iter().map(|g| model.predict_proba(g)).collect()
        }
    }
}

/// ROC AUC of scores against the rows' outcomes. A single-class
/// validation set carries no ranking information; score it at chance.
#[must_use]
pub fn validation_auc(table: &GameTable, rows: &[usize], scores: &[f64]) -> f64 {
    let labels: Vec<usize> = rows
        .iter()
        .map(|&i| table.record(i).outcome.class_index())
        .collect();
    roc_auc(&labels, scores).unwrap_or(0.5)
}

fn derive_seed(seed: u64, grid_index: usize, fold: usize) -> u64 {
    seed.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add((grid_index as u64) << 32)
        .wrapping_add(fold as u64)
}
