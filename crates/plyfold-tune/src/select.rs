//! Ranking and best-model selection
//!
//! Every grid point's fold metrics collapse to a [`MetricSummary`]; grid
//! points are then ranked by mean validation AUC, with standard error as
//! the first tie-break and original grid order as the last. The sort is
//! stable, so two literally identical summaries keep the order their
//! grid points were constructed in.

use plyfold_model::family::ModelFamily;
use plyfold_stats::summary::MetricSummary;

use crate::{artifact::TuningArtifact, grid::GridPoint};

/// A grid point with its aggregated validation metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedPoint {
    pub point: GridPoint,
    pub summary: MetricSummary,
}

/// The configuration chosen across all families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub family: ModelFamily,
    pub best: RankedPoint,
}

/// Ranks one artifact's grid points, best first.
///
/// Grid points whose fold metrics are empty cannot happen in a validated
/// artifact, so every point gets a summary.
#[must_use]
pub fn rank(artifact: &TuningArtifact) -> Vec<RankedPoint> {
    let mut ranked: Vec<RankedPoint> = artifact
        .results
        .iter()
        .filter_map(|result| {
            MetricSummary::new(result.fold_metrics.iter().copied()).map(|summary| RankedPoint {
                point: result.point,
                summary,
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.summary
            .mean
            .total_cmp(&a.summary.mean)
            .then(a.summary.std_err.total_cmp(&b.summary.std_err))
    });
    ranked
}

/// The winning grid point of one artifact.
#[must_use]
pub fn best_of(artifact: &TuningArtifact) -> Option<RankedPoint> {
    rank(artifact).into_iter().next()
}

/// Picks the overall winner across one artifact per family.
///
/// Cross-family ties break the same way as within a family: higher mean,
/// then lower standard error, then the order the artifacts were given in.
#[must_use]
pub fn select(artifacts: &[TuningArtifact]) -> Option<Selection> {
    artifacts
        .iter()
        .filter_map(|artifact| {
            best_of(artifact).map(|best| Selection {
                family: artifact.family,
                best,
            })
        })
        .reduce(|winner, candidate| {
            let by_mean = candidate
                .best
                .summary
                .mean
                .total_cmp(&winner.best.summary.mean)
                .then(
                    winner
                        .best
                        .summary
                        .std_err
                        .total_cmp(&candidate.best.summary.std_err),
                );
            if by_mean == std::cmp::Ordering::Greater {
                candidate
            } else {
                winner
            }
        })
}

#[cfg(test)]
mod tests {
    use crate::{
        engine::GridPointResult,
        grid::{GridPoint, LogisticPoint, SvmPoint},
    };

    use super::*;

    fn svm_artifact(results: Vec<(f64, Vec<f64>)>) -> TuningArtifact {
        let folds = results[0].1.len();
        let results = results
            .into_iter()
            .map(|(cost, fold_metrics)| GridPointResult {
                point: GridPoint::LinearSvm(SvmPoint { cost, degree: 1 }),
                fold_metrics,
            })
            .collect();
        TuningArtifact::new(ModelFamily::LinearSvm, 1, folds, results)
    }

    fn logistic_artifact(results: Vec<(f64, Vec<f64>)>) -> TuningArtifact {
        let folds = results[0].1.len();
        let results = results
            .into_iter()
            .map(|(penalty, fold_metrics)| GridPointResult {
                point: GridPoint::LogisticRegression(LogisticPoint {
                    penalty,
                    mixture: 0.5,
                }),
                fold_metrics,
            })
            .collect();
        TuningArtifact::new(ModelFamily::LogisticRegression, 1, folds, results)
    }

    #[test]
    fn ranks_by_mean_descending() {
        let artifact = svm_artifact(vec![
            (0.5, vec![0.6, 0.6]),
            (1.0, vec![0.8, 0.8]),
            (2.0, vec![0.7, 0.7]),
        ]);
        let ranked = rank(&artifact);
        let means: Vec<f64> = ranked.iter().map(|r| r.summary.mean).collect();
        assert_eq!(means, vec![0.8, 0.7, 0.6]);
    }

    #[test]
    fn equal_means_break_on_std_err() {
        // both mean 0.7; the steadier point wins
        let artifact = svm_artifact(vec![
            (0.5, vec![0.5, 0.9]),
            (1.0, vec![0.69, 0.71]),
        ]);
        let best = best_of(&artifact).unwrap();
        assert_eq!(best.point, GridPoint::LinearSvm(SvmPoint { cost: 1.0, degree: 1 }));
    }

    #[test]
    fn full_ties_keep_grid_order() {
        let artifact = svm_artifact(vec![
            (0.5, vec![0.7, 0.7]),
            (1.0, vec![0.7, 0.7]),
        ]);
        let best = best_of(&artifact).unwrap();
        assert_eq!(best.point, GridPoint::LinearSvm(SvmPoint { cost: 0.5, degree: 1 }));
    }

    #[test]
    fn selects_across_families() {
        let svm = svm_artifact(vec![(1.0, vec![0.72, 0.74])]);
        let logistic = logistic_artifact(vec![(0.1, vec![0.8, 0.82])]);
        let selection = select(&[svm, logistic]).unwrap();
        assert_eq!(selection.family, ModelFamily::LogisticRegression);
        assert!((selection.best.summary.mean - 0.81).abs() < 1e-12);
    }

    #[test]
    fn cross_family_ties_keep_artifact_order() {
        let svm = svm_artifact(vec![(1.0, vec![0.75, 0.75])]);
        let logistic = logistic_artifact(vec![(0.1, vec![0.75, 0.75])]);
        let selection = select(&[svm.clone(), logistic]).unwrap();
        assert_eq!(selection.family, ModelFamily::LinearSvm);
        assert_eq!(selection.best.point, svm.results[0].point);
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(select(&[]), None);
    }
}
