//! Random forest of probability trees
//!
//! Each tree is grown on a bootstrap sample of the training rows, with
//! `mtry` candidate features drawn at every split and `min_n` as the
//! minimum node size. On {0, 1} labels a regression tree's leaf mean is a
//! class probability, so the forest prediction is the plain average of
//! per-tree leaf means.

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    recipe::SparseRow,
    tree::{RegressionTree, TreeConfig},
};

/// Fit configuration for one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomForestConfig {
    /// Number of trees in the ensemble.
    pub trees: usize,
    /// Features examined per split.
    pub mtry: usize,
    /// Minimum node size.
    pub min_n: usize,
    /// RNG seed for bootstrap and feature sampling.
    pub seed: u64,
}

impl RandomForestConfig {
    /// Fits on indicator rows with {0, 1} labels.
    #[must_use]
    pub fn fit(&self, rows: &[SparseRow], labels: &[f64], dim: usize) -> RandomForestModel {
        assert_eq!(rows.len(), labels.len());
        assert!(!rows.is_empty());

        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        let feature_pool: Vec<usize> = (0..dim).collect();
        let config = TreeConfig {
            min_n: self.min_n,
            max_depth: 24,
            mtry: self.mtry.min(dim.max(1)),
        };

        let trees = (0..self.trees)
            .map(|_| {
                let sample: Vec<usize> = (0..rows.len())
                    .map(|_| rng.random_range(0..rows.len()))
                    .collect();
                RegressionTree::fit(rows, labels, None, &sample, &feature_pool, config, &mut rng)
            })
            .collect();

        RandomForestModel { trees }
    }
}

/// A fitted forest.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    trees: Vec<RegressionTree>,
}

impl RandomForestModel {
    /// Probability of the positive class: mean of per-tree leaf means,
    /// clamped into [0, 1] against leaf-value rounding.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn predict_proba(&self, row: &SparseRow) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    /// Number of fitted trees.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(active: &[usize]) -> SparseRow {
        SparseRow {
            active: active.to_vec(),
        }
    }

    fn signal_data() -> (Vec<SparseRow>, Vec<f64>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..60 {
            if i % 2 == 0 {
                rows.push(row(&[0, 2]));
                labels.push(1.0);
            } else {
                rows.push(row(&[1, 2]));
                labels.push(0.0);
            }
        }
        (rows, labels)
    }

    #[test]
    fn learns_a_simple_signal() {
        let (rows, labels) = signal_data();
        let config = RandomForestConfig {
            trees: 25,
            mtry: 2,
            min_n: 2,
            seed: 7,
        };
        let model = config.fit(&rows, &labels, 3);
        assert_eq!(model.tree_count(), 25);
        assert!(model.predict_proba(&row(&[0, 2])) > 0.8);
        assert!(model.predict_proba(&row(&[1, 2])) < 0.2);
    }

    #[test]
    fn same_seed_same_model() {
        let (rows, labels) = signal_data();
        let config = RandomForestConfig {
            trees: 10,
            mtry: 1,
            min_n: 2,
            seed: 3,
        };
        let a = config.fit(&rows, &labels, 3);
        let b = config.fit(&rows, &labels, 3);
        let probe = row(&[0, 2]);
        assert!((a.predict_proba(&probe) - b.predict_proba(&probe)).abs() < 1e-15);
    }

    #[test]
    fn huge_min_n_collapses_to_base_rate() {
        let (rows, labels) = signal_data();
        let config = RandomForestConfig {
            trees: 5,
            mtry: 2,
            min_n: 1000,
            seed: 1,
        };
        let model = config.fit(&rows, &labels, 3);
        let p = model.predict_proba(&row(&[0, 2]));
        // every tree is a single bootstrap-mean leaf near 0.5
        assert!((p - 0.5).abs() < 0.2);
    }

    #[test]
    fn mtry_larger_than_dim_is_clamped() {
        let (rows, labels) = signal_data();
        let config = RandomForestConfig {
            trees: 5,
            mtry: 250,
            min_n: 2,
            seed: 2,
        };
        let model = config.fit(&rows, &labels, 3);
        assert!(model.predict_proba(&row(&[0, 2])) > 0.8);
    }
}
