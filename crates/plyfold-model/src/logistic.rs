//! Elastic-net regularized logistic regression
//!
//! Penalty follows the glmnet parameterization: the objective is the mean
//! logistic loss plus `penalty * (mixture * |w|_1 + (1 - mixture) / 2 *
//! |w|_2^2)`. `mixture = 0` is pure ridge, `mixture = 1` pure lasso.
//!
//! Fitting is full-batch proximal gradient descent: a gradient step on
//! the smooth part (loss + ridge), then soft-thresholding for the L1
//! part. Rows are sparse indicator rows, so each gradient pass touches
//! only the active features of each game. The intercept is unpenalized.

use crate::recipe::SparseRow;

/// Fit configuration for one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticNetLogistic {
    /// Total regularization strength (lambda).
    pub penalty: f64,
    /// L1 share of the penalty (alpha), in [0, 1].
    pub mixture: f64,
    /// Gradient descent iterations.
    pub epochs: usize,
    /// Step size.
    pub step: f64,
}

impl Default for ElasticNetLogistic {
    fn default() -> Self {
        Self {
            penalty: 0.0,
            mixture: 0.0,
            epochs: 150,
            step: 0.5,
        }
    }
}

impl ElasticNetLogistic {
    /// Fits on indicator rows with {0, 1} labels.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(&self, rows: &[SparseRow], labels: &[f64], dim: usize) -> LogisticModel {
        assert_eq!(rows.len(), labels.len());
        assert!(!rows.is_empty());

        let n = rows.len() as f64;
        let mut weights = vec![0.0; dim];
        let mut intercept = 0.0;
        let ridge = self.penalty * (1.0 - self.mixture);
        let l1_threshold = self.step * self.penalty * self.mixture;

        let mut gradient = vec![0.0; dim];
        for _ in 0..self.epochs {
            gradient.fill(0.0);
            let mut intercept_gradient = 0.0;
            for (row, &label) in rows.iter().zip(labels) {
                let margin =
                    intercept + row.active.iter().map(|&f| weights[f]).sum::<f64>();
                let error = sigmoid(margin) - label;
                for &feature in &row.active {
                    gradient[feature] += error;
                }
                intercept_gradient += error;
            }

            for (weight, &grad) in weights.iter_mut().zip(&gradient) {
                *weight -= self.step * (grad / n + ridge * *weight);
                *weight = soft_threshold(*weight, l1_threshold);
            }
            intercept -= self.step * intercept_gradient / n;
        }

        LogisticModel { weights, intercept }
    }
}

/// A fitted logistic model.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Probability of the positive class.
    #[must_use]
    pub fn predict_proba(&self, row: &SparseRow) -> f64 {
        let margin = self.intercept
            + row
                .active
                .iter()
                .filter(|&&f| f < self.weights.len())
                .map(|&f| self.weights[f])
                .sum::<f64>();
        sigmoid(margin)
    }

    /// Number of exactly-zero coefficients (lasso sparsity).
    #[must_use]
    pub fn zero_weight_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w == 0.0).count()
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
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

    /// Feature 0 determines the label, feature 1 is constant noise.
    fn separable() -> (Vec<SparseRow>, Vec<f64>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
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
    fn learns_a_separable_pattern() {
        let (rows, labels) = separable();
        let model = ElasticNetLogistic::default().fit(&rows, &labels, 3);
        assert!(model.predict_proba(&row(&[0, 2])) > 0.8);
        assert!(model.predict_proba(&row(&[1, 2])) < 0.2);
    }

    #[test]
    fn ridge_shrinks_but_keeps_weights() {
        let (rows, labels) = separable();
        let config = ElasticNetLogistic {
            penalty: 0.1,
            mixture: 0.0,
            ..Default::default()
        };
        let model = config.fit(&rows, &labels, 3);
        let plain = ElasticNetLogistic::default().fit(&rows, &labels, 3);
        let p_reg = model.predict_proba(&row(&[0, 2]));
        let p_plain = plain.predict_proba(&row(&[0, 2]));
        assert!(p_reg > 0.5);
        assert!(p_reg < p_plain);
    }

    #[test]
    fn strong_lasso_zeroes_everything() {
        let (rows, labels) = separable();
        let config = ElasticNetLogistic {
            penalty: 10.0,
            mixture: 1.0,
            ..Default::default()
        };
        let model = config.fit(&rows, &labels, 3);
        assert_eq!(model.zero_weight_count(), 3);
    }

    #[test]
    fn unknown_features_are_ignored_at_predict_time() {
        let (rows, labels) = separable();
        let model = ElasticNetLogistic::default().fit(&rows, &labels, 3);
        let with_extra = model.predict_proba(&row(&[0, 2, 99]));
        let without = model.predict_proba(&row(&[0, 2]));
        assert!((with_extra - without).abs() < 1e-12);
    }
}
