//! Validation metrics for binary classifiers
//!
//! Everything scores the positive class (black win, label 1) by a
//! probability-scale value. ROC AUC is the tuning metric; the ROC curve
//! and the confusion matrix only appear in the final test report.

use serde::{Deserialize, Serialize};

/// Area under the ROC curve, computed from tie-corrected ranks
/// (Mann-Whitney form).
///
/// # Returns
///
/// * `Some(auc)` - if both classes are present
/// * `None` - if labels are all-positive or all-negative
///
/// # Examples
///
/// ```
/// use plyfold_model::metrics::roc_auc;
///
/// // perfect ranking
/// let auc = roc_auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]).unwrap();
/// assert!((auc - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn roc_auc(labels: &[usize], scores: &[f64]) -> Option<f64> {
    assert_eq!(labels.len(), scores.len());
    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // Average ranks across tied scores, then sum positive ranks.
    let mut positive_rank_sum = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j < order.len() && scores[order[j]] == scores[order[i]] {
            j += 1;
        }
        let average_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            if labels[idx] == 1 {
                positive_rank_sum += average_rank;
            }
        }
        i = j;
    }

    let pos = positives as f64;
    let neg = negatives as f64;
    Some((positive_rank_sum - pos * (pos + 1.0) / 2.0) / (pos * neg))
}

/// One point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    /// False-positive rate at this threshold.
    pub fpr: f64,
    /// True-positive rate at this threshold.
    pub tpr: f64,
}

/// The full ROC curve: (FPR, TPR) at every distinct score threshold,
/// from (0, 0) down through all thresholds to (1, 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
}

impl RocCurve {
    /// Sweeps all score thresholds, highest first.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute(labels: &[usize], scores: &[f64]) -> Self {
        assert_eq!(labels.len(), scores.len());
        let positives = labels.iter().filter(|&&l| l == 1).count();
        let negatives = labels.len() - positives;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let mut points = vec![RocPoint { fpr: 0.0, tpr: 0.0 }];
        let mut true_positives = 0usize;
        let mut false_positives = 0usize;
        let mut i = 0;
        while i < order.len() {
            // Consume the whole tie group before emitting a point.
            let mut j = i;
            while j < order.len() && scores[order[j]] == scores[order[i]] {
                if labels[order[j]] == 1 {
                    true_positives += 1;
                } else {
                    false_positives += 1;
                }
                j += 1;
            }
            points.push(RocPoint {
                fpr: if negatives == 0 {
                    0.0
                } else {
                    false_positives as f64 / negatives as f64
                },
                tpr: if positives == 0 {
                    0.0
                } else {
                    true_positives as f64 / positives as f64
                },
            });
            i = j;
        }

        Self { points }
    }
}

/// 2x2 confusion matrix at a fixed probability threshold. Positive class
/// is black win (label 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Scores at or above `threshold` predict the positive class.
    #[must_use]
    pub fn at_threshold(labels: &[usize], scores: &[f64], threshold: f64) -> Self {
        assert_eq!(labels.len(), scores.len());
        let mut matrix = Self {
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        };
        for (&label, &score) in labels.iter().zip(scores) {
            let predicted_positive = score >= threshold;
            match (label == 1, predicted_positive) {
                (true, true) => matrix.true_positives += 1,
                (false, true) => matrix.false_positives += 1,
                (false, false) => matrix.true_negatives += 1,
                (true, false) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    /// Total count across all four cells.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct predictions.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / self.total() as f64
    }
}
