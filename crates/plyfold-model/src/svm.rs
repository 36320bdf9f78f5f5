//! Linear support-vector machine
//!
//! L2-regularized hinge loss, degree fixed at 1 (a linear kernel), fit
//! with Pegasos-style stochastic subgradient descent. The regularization
//! strength is `lambda = 1 / (cost * n)`, so larger cost means a softer
//! margin penalty, matching the usual C parameterization.
//!
//! Unlike the other families this model takes *unexpanded* encoded rows:
//! its fit routine builds the (column, level) indicator mapping itself
//! from the training data. Handing it pre-expanded indicator rows would
//! expand the categorical columns twice, which is exactly the blow-up
//! the identity recipe exists to avoid, so the API only accepts
//! [`EncodedGame`] rows.
//!
//! The ranking score is `sigmoid(margin)`: monotone in the margin, so
//! ROC-based metrics are unaffected by the lack of a calibrated
//! probability.

use std::collections::HashMap;

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use plyfold_data::vocab::EncodedGame;

use crate::logistic::sigmoid;

/// Fit configuration for one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSvmConfig {
    /// Soft-margin cost C.
    pub cost: f64,
    /// Polynomial degree; the grid fixes this at 1.
    pub degree: u32,
    /// Passes over the training data.
    pub epochs: usize,
    /// RNG seed for the per-epoch shuffle.
    pub seed: u64,
}

impl LinearSvmConfig {
    /// Fits on encoded (unexpanded) rows with {0, 1} labels.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(&self, games: &[EncodedGame], labels: &[f64]) -> LinearSvmModel {
        assert_eq!(games.len(), labels.len());
        assert!(!games.is_empty());
        assert_eq!(self.degree, 1, "only the linear kernel is supported");

        // Internal indicator expansion: one weight per (column, level)
        // pair observed in the training rows.
        let mut feature_index: HashMap<(usize, u32), usize> = HashMap::new();
        for game in games {
            for (column, &level) in game.levels.iter().enumerate() {
                let next = feature_index.len();
                feature_index.entry((column, level)).or_insert(next);
            }
        }

        let n = games.len();
        let lambda = 1.0 / (self.cost.max(1e-12) * n as f64);
        let mut weights = vec![0.0; feature_index.len()];
        let mut bias = 0.0;

        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..n).collect();
        let mut step_count = 0usize;
        for _ in 0..self.epochs {
            order.shuffle(&mut rng);
            for &i in &order {
                step_count += 1;
                let eta = 1.0 / (lambda * step_count as f64);
                // labels in {0,1} -> y in {-1,+1}
                let y = 2.0 * labels[i] - 1.0;

                let margin = margin_of(&games[i], &feature_index, &weights, bias);
                // shrink from the L2 term, then a hinge step if violating
                for weight in &mut weights {
                    *weight *= 1.0 - eta * lambda;
                }
                if y * margin < 1.0 {
                    let step = eta;
                    for (column, &level) in games[i].levels.iter().enumerate() {
                        if let Some(&f) = feature_index.get(&(column, level)) {
                            weights[f] += step * y;
                        }
                    }
                    bias += step * y;
                }
            }
        }

        LinearSvmModel {
            feature_index,
            weights,
            bias,
        }
    }
}

impl Default for LinearSvmConfig {
    fn default() -> Self {
        Self {
            cost: 1.0,
            degree: 1,
            epochs: 30,
            seed: 0,
        }
    }
}

/// A fitted linear SVM.
#[derive(Debug, Clone)]
pub struct LinearSvmModel {
    feature_index: HashMap<(usize, u32), usize>,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearSvmModel {
    /// Signed distance from the separating hyperplane. (column, level)
    /// pairs unseen at fit time contribute nothing.
    #[must_use]
    pub fn decision(&self, game: &EncodedGame) -> f64 {
        margin_of(game, &self.feature_index, &self.weights, self.bias)
    }

    /// Probability-scale ranking score for the positive class.
    #[must_use]
    pub fn predict_proba(&self, game: &EncodedGame) -> f64 {
        sigmoid(self.decision(game))
    }
}

fn margin_of(
    game: &EncodedGame,
    feature_index: &HashMap<(usize, u32), usize>,
    weights: &[f64],
    bias: f64,
) -> f64 {
    let mut margin = bias;
    for (column, &level) in game.levels.iter().enumerate() {
        if let Some(&f) = feature_index.get(&(column, level)) {
            margin += weights[f];
        }
    }
    margin
}
