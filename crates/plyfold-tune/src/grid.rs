//! Hyperparameter grids
//!
//! Grid sizes and boundary values are contractual: 25 points for the
//! logistic, forest, and boosted families, 5 for the SVM. Tree counts
//! are fixed at 200 for both ensembles and the SVM degree is fixed at 1;
//! neither is tuned.

use serde::{Deserialize, Serialize};

use plyfold_model::family::ModelFamily;

/// Ensemble size for both tree families.
pub const ENSEMBLE_TREES: usize = 200;

/// Levels per tuned dimension.
const GRID_LEVELS: usize = 5;

/// Elastic-net grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticPoint {
    pub penalty: f64,
    pub mixture: f64,
}

/// Random-forest grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestPoint {
    pub mtry: usize,
    pub min_n: usize,
    pub trees: usize,
}

/// Boosted-trees grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostPoint {
    pub mtry: usize,
    pub learn_rate: f64,
    pub trees: usize,
}

/// Linear-SVM grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvmPoint {
    pub cost: f64,
    pub degree: u32,
}

/// One hyperparameter combination, tagged with its family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum GridPoint {
    LogisticRegression(LogisticPoint),
    RandomForest(ForestPoint),
    BoostedTrees(BoostPoint),
    LinearSvm(SvmPoint),
}

impl GridPoint {
    #[must_use]
    pub fn family(&self) -> ModelFamily {
        match self {
            Self::LogisticRegression(_) => ModelFamily::LogisticRegression,
            Self::RandomForest(_) => ModelFamily::RandomForest,
            Self::BoostedTrees(_) => ModelFamily::BoostedTrees,
            Self::LinearSvm(_) => ModelFamily::LinearSvm,
        }
    }

    /// Compact parameter rendering for report tables.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::LogisticRegression(p) => {
                format!("penalty={:.3} mixture={:.3}", p.penalty, p.mixture)
            }
            Self::RandomForest(p) => {
                format!("mtry={} min_n={} trees={}", p.mtry, p.min_n, p.trees)
            }
            Self::BoostedTrees(p) => {
                format!("mtry={} learn_rate={:.3e} trees={}", p.mtry, p.learn_rate, p.trees)
            }
            Self::LinearSvm(p) => format!("cost={:.4} degree={}", p.cost, p.degree),
        }
    }
}

/// Builds the full grid for one family, in construction order.
#[must_use]
pub fn grid_for(family: ModelFamily) -> Vec<GridPoint> {
    match family {
        ModelFamily::LogisticRegression => logistic_grid(),
        ModelFamily::RandomForest => forest_grid(),
        ModelFamily::BoostedTrees => boost_grid(),
        ModelFamily::LinearSvm => svm_grid(),
    }
}

/// penalty x mixture, linear over [0, 1] each: 25 points.
fn logistic_grid() -> Vec<GridPoint> {
    let levels = linspace(0.0, 1.0, GRID_LEVELS);
    let mut grid = Vec::with_capacity(GRID_LEVELS * GRID_LEVELS);
    for &penalty in &levels {
        for &mixture in &levels {
            grid.push(GridPoint::LogisticRegression(LogisticPoint {
                penalty,
                mixture,
            }));
        }
    }
    grid
}

/// mtry over [50, 250] x min_n over [10, 1000], both linear: 25 points.
fn forest_grid() -> Vec<GridPoint> {
    let mtry_levels = linspace_rounded(50, 250, GRID_LEVELS);
    let min_n_levels = linspace_rounded(10, 1000, GRID_LEVELS);
    let mut grid = Vec::with_capacity(GRID_LEVELS * GRID_LEVELS);
    for &mtry in &mtry_levels {
        for &min_n in &min_n_levels {
            grid.push(GridPoint::RandomForest(ForestPoint {
                mtry,
                min_n,
                trees: ENSEMBLE_TREES,
            }));
        }
    }
    grid
}

/// mtry over [50, 250] linear x learn_rate log-spaced over
/// [1e-10, 1e-1]: 25 points.
fn boost_grid() -> Vec<GridPoint> {
    let mtry_levels = linspace_rounded(50, 250, GRID_LEVELS);
    let rate_levels = log10space(-10.0, -1.0, GRID_LEVELS);
    let mut grid = Vec::with_capacity(GRID_LEVELS * GRID_LEVELS);
    for &mtry in &mtry_levels {
        for &learn_rate in &rate_levels {
            grid.push(GridPoint::BoostedTrees(BoostPoint {
                mtry,
                learn_rate,
                trees: ENSEMBLE_TREES,
            }));
        }
    }
    grid
}

/// The default cost grid: 2^x for x linear over [-10, 5], degree fixed
/// at 1: 5 points.
fn svm_grid() -> Vec<GridPoint> {
    linspace(-10.0, 5.0, GRID_LEVELS)
        .into_iter()
        .map(|exponent| {
            GridPoint::LinearSvm(SvmPoint {
                cost: 2.0f64.powf(exponent),
                degree: 1,
            })
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn linspace(lo: f64, hi: f64, levels: usize) -> Vec<f64> {
    assert!(levels >= 2);
    let step = (hi - lo) / (levels - 1) as f64;
    (0..levels).map(|i| lo + step * i as f64).collect()
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn linspace_rounded(lo: usize, hi: usize, levels: usize) -> Vec<usize> {
    linspace(lo as f64, hi as f64, levels)
        .into_iter()
        .map(|v| v.round() as usize)
        .collect()
}

fn log10space(lo_exponent: f64, hi_exponent: f64, levels: usize) -> Vec<f64> {
    linspace(lo_exponent, hi_exponent, levels)
        .into_iter()
        .map(|exponent| 10.0f64.powf(exponent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sizes_are_contractual() {
        assert_eq!(grid_for(ModelFamily::LogisticRegression).len(), 25);
        assert_eq!(grid_for(ModelFamily::RandomForest).len(), 25);
        assert_eq!(grid_for(ModelFamily::BoostedTrees).len(), 25);
        assert_eq!(grid_for(ModelFamily::LinearSvm).len(), 5);
    }

    #[test]
    fn logistic_grid_spans_the_unit_square() {
        let grid = logistic_grid();
        let penalties: Vec<f64> = grid
            .iter()
            .map(|p| match p {
                GridPoint::LogisticRegression(p) => p.penalty,
                _ => unreachable!(),
            })
            .collect();
        assert!(penalties.contains(&0.0));
        assert!(penalties.contains(&1.0));
    }

    #[test]
    fn forest_grid_boundaries() {
        let grid = forest_grid();
        let points: Vec<ForestPoint> = grid
            .iter()
            .map(|p| match p {
                GridPoint::RandomForest(p) => *p,
                _ => unreachable!(),
            })
            .collect();
        assert!(points.iter().any(|p| p.mtry == 50));
        assert!(points.iter().any(|p| p.mtry == 250));
        assert!(points.iter().any(|p| p.min_n == 10));
        assert!(points.iter().any(|p| p.min_n == 1000));
        assert!(points.iter().all(|p| p.trees == ENSEMBLE_TREES));
    }

    #[test]
    fn boost_learn_rates_are_log_spaced() {
        let grid = boost_grid();
        let mut rates: Vec<f64> = grid
            .iter()
            .filter_map(|p| match p {
                GridPoint::BoostedTrees(p) => Some(p.learn_rate),
                _ => None,
            })
            .collect();
        rates.sort_by(f64::total_cmp);
        rates.dedup();
        assert_eq!(rates.len(), 5);
        assert!((rates[0] - 1e-10).abs() < 1e-22);
        assert!((rates[4] - 1e-1).abs() < 1e-13);
    }

    #[test]
    fn svm_grid_is_powers_of_two_with_linear_kernel() {
        let grid = svm_grid();
        let points: Vec<SvmPoint> = grid
            .iter()
            .map(|p| match p {
                GridPoint::LinearSvm(p) => *p,
                _ => unreachable!(),
            })
            .collect();
        assert!(points.iter().all(|p| p.degree == 1));
        assert!((points[0].cost - 2.0f64.powi(-10)).abs() < 1e-12);
        assert!((points[4].cost - 32.0).abs() < 1e-12);
    }

    #[test]
    fn min_n_rounding_matches_the_linear_grid() {
        assert_eq!(linspace_rounded(10, 1000, 5), vec![10, 258, 505, 753, 1000]);
        assert_eq!(linspace_rounded(50, 250, 5), vec![50, 100, 150, 200, 250]);
    }

    #[test]
    fn every_point_knows_its_family() {
        for family in ModelFamily::ALL {
            for point in grid_for(family) {
                assert_eq!(point.family(), family);
            }
        }
    }
}
