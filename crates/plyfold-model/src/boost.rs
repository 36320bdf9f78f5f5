//! Gradient-boosted trees with logistic loss
//!
//! Boosting keeps an additive model in log-odds space. Each round fits a
//! shallow regression tree to the current gradient residuals `y - p` with
//! Newton-step leaf values (`sum(residual) / sum(p * (1 - p))`), scaled
//! by the learning rate. `mtry` features are sampled once per tree, not
//! per split, which is the column-subsampling convention for boosting.

use rand::{SeedableRng as _, seq::index};
use rand_pcg::Pcg64Mcg;

use crate::{
    logistic::sigmoid,
    recipe::SparseRow,
    tree::{RegressionTree, TreeConfig},
};

const MAX_TREE_DEPTH: usize = 4;
const MIN_NODE_SIZE: usize = 10;

/// Fit configuration for one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostedTreesConfig {
    /// Number of boosting rounds.
    pub trees: usize,
    /// Features sampled per tree.
    pub mtry: usize,
    /// Shrinkage applied to each tree's contribution.
    pub learn_rate: f64,
    /// RNG seed for per-tree feature sampling.
    pub seed: u64,
}

impl BoostedTreesConfig {
    /// Fits on indicator rows with {0, 1} labels.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(&self, rows: &[SparseRow], labels: &[f64], dim: usize) -> BoostedTreesModel {
        assert_eq!(rows.len(), labels.len());
        assert!(!rows.is_empty());

        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        let n = rows.len();
        let base_rate = (labels.iter().sum::<f64>() / n as f64).clamp(1e-6, 1.0 - 1e-6);
        let init = (base_rate / (1.0 - base_rate)).ln();

        let sample: Vec<usize> = (0..n).collect();
        let tree_config = TreeConfig {
            min_n: MIN_NODE_SIZE,
            max_depth: MAX_TREE_DEPTH,
            mtry: usize::MAX,
        };

        let mut log_odds = vec![init; n];
        let mut residuals = vec![0.0; n];
        let mut hessians = vec![0.0; n];
        let mut trees = Vec::with_capacity(self.trees);
        for _ in 0..self.trees {
            for i in 0..n {
                let p = sigmoid(log_odds[i]);
                residuals[i] = labels[i] - p;
                hessians[i] = p * (1.0 - p);
            }

            let pool_size = self.mtry.clamp(1, dim.max(1));
            let feature_pool: Vec<usize> =
                index::sample(&mut rng, dim, pool_size.min(dim)).into_vec();

            let tree = RegressionTree::fit(
                rows,
                &residuals,
                Some(&hessians),
                &sample,
                &feature_pool,
                tree_config,
                &mut rng,
            );
            for (i, row) in rows.iter().enumerate() {
                log_odds[i] += self.learn_rate * tree.predict(row);
            }
            trees.push(tree);
        }

        BoostedTreesModel {
            init,
            learn_rate: self.learn_rate,
            trees,
        }
    }
}

/// A fitted boosted ensemble.
#[derive(Debug, Clone)]
pub struct BoostedTreesModel {
    init: f64,
    learn_rate: f64,
    trees: Vec<RegressionTree>,
}

impl BoostedTreesModel {
    /// Probability of the positive class.
    #[must_use]
    pub fn predict_proba(&self, row: &SparseRow) -> f64 {
        let log_odds = self.init
            + self.learn_rate
                * self
                    .trees
                    .iter()
                    .map(|t| t.predict(row))
                    .sum::<f64>();
        sigmoid(log_odds)
    }

    /// Number of boosting rounds performed.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}
