//! Regression trees over binary indicator features
//!
//! One tree implementation serves both ensembles: on {0, 1} targets,
//! variance reduction picks the same splits as Gini gain, so the forest
//! grows these trees on raw labels while boosting grows them on gradient
//! residuals with Newton-step leaf values.
//!
//! Splits are always "feature present vs absent". Candidate features at
//! each split are drawn without replacement from a caller-supplied pool.

use rand::{Rng, seq::index};

use crate::recipe::SparseRow;

/// Growth limits for one tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeConfig {
    /// Stop splitting below this node size.
    pub min_n: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Features sampled (without replacement) at each split.
    pub mtry: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        absent: Box<Node>,
        present: Box<Node>,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone)]
pub(crate) struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fits a tree on the sample subset `sample` (indices into `rows`).
    ///
    /// `targets` are the regression targets; `hessians`, when given,
    /// weight the leaf values Newton-style (`sum(target) / sum(hessian)`)
    /// instead of plain means.
    pub(crate) fn fit<R>(
        rows: &[SparseRow],
        targets: &[f64],
        hessians: Option<&[f64]>,
        sample: &[usize],
        feature_pool: &[usize],
        config: TreeConfig,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(!sample.is_empty());
        let root = grow(rows, targets, hessians, sample, feature_pool, config, 0, rng);
        Self { root }
    }

    pub(crate) fn predict(&self, row: &SparseRow) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    absent,
                    present,
                } => {
                    node = if row.has(*feature) { present } else { absent };
                }
            }
        }
    }
}

#[expect(clippy::too_many_arguments)]
fn grow<R>(
    rows: &[SparseRow],
    targets: &[f64],
    hessians: Option<&[f64]>,
    sample: &[usize],
    feature_pool: &[usize],
    config: TreeConfig,
    depth: usize,
    rng: &mut R,
) -> Node
where
    R: Rng + ?Sized,
{
    if depth >= config.max_depth || sample.len() < config.min_n.max(2) {
        return leaf(targets, hessians, sample);
    }

    let Some((feature, present, absent)) =
        best_split(rows, targets, sample, feature_pool, config.mtry, rng)
    else {
        return leaf(targets, hessians, sample);
    };

    let absent_node = grow(
        rows,
        targets,
        hessians,
        &absent,
        feature_pool,
        config,
        depth + 1,
        rng,
    );
    let present_node = grow(
        rows,
        targets,
        hessians,
        &present,
        feature_pool,
        config,
        depth + 1,
        rng,
    );
    Node::Split {
        feature,
        absent: Box::new(absent_node),
        present: Box::new(present_node),
    }
}

#[expect(clippy::cast_precision_loss)]
fn leaf(targets: &[f64], hessians: Option<&[f64]>, sample: &[usize]) -> Node {
    let target_sum: f64 = sample.iter().map(|&i| targets[i]).sum();
    let value = match hessians {
        // Small ridge term keeps near-pure leaves finite.
        Some(h) => target_sum / (sample.iter().map(|&i| h[i]).sum::<f64>() + 1e-6),
        None => target_sum / sample.len() as f64,
    };
    Node::Leaf { value }
}

/// Picks the variance-reduction-maximal split among `mtry` sampled
/// features, or `None` if no sampled feature separates the node.
#[expect(clippy::cast_precision_loss)]
fn best_split<R>(
    rows: &[SparseRow],
    targets: &[f64],
    sample: &[usize],
    feature_pool: &[usize],
    mtry: usize,
    rng: &mut R,
) -> Option<(usize, Vec<usize>, Vec<usize>)>
where
    R: Rng + ?Sized,
{
    let draw = mtry.min(feature_pool.len());
    if draw == 0 {
        return None;
    }
    let candidates = index::sample(rng, feature_pool.len(), draw);

    let total_sum: f64 = sample.iter().map(|&i| targets[i]).sum();
    let total_n = sample.len() as f64;
    let base_score = total_sum * total_sum / total_n;

    let mut best: Option<(f64, usize)> = None;
    for pool_index in candidates {
        let feature = feature_pool[pool_index];
        let mut present_sum = 0.0;
        let mut present_n = 0usize;
        for &i in sample {
            if rows[i].has(feature) {
                present_sum += targets[i];
                present_n += 1;
            }
        }
        if present_n == 0 || present_n == sample.len() {
            continue;
        }
        let absent_sum = total_sum - present_sum;
        let absent_n = total_n - present_n as f64;
        let gain = present_sum * present_sum / present_n as f64
            + absent_sum * absent_sum / absent_n
            - base_score;
        if gain > 1e-12 && best.is_none_or(|(g, _)| gain > g) {
            best = Some((gain, feature));
        }
    }

    let (_, feature) = best?;
    let (present, absent): (Vec<usize>, Vec<usize>) =
        sample.iter().partition(|&&i| rows[i].has(feature));
    Some((feature, present, absent))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn row(active: &[usize]) -> SparseRow {
        SparseRow {
            active: active.to_vec(),
        }
    }

    fn xor_free_data() -> (Vec<SparseRow>, Vec<f64>) {
        // feature 0 present => target 1, absent => target 0
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for i in 0..20 {
            if i % 2 == 0 {
                rows.push(row(&[0]));
                targets.push(1.0);
            } else {
                rows.push(row(&[1]));
                targets.push(0.0);
            }
        }
        (rows, targets)
    }

    #[test]
    fn splits_on_the_informative_feature() {
        let (rows, targets) = xor_free_data();
        let sample: Vec<usize> = (0..rows.len()).collect();
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let tree = RegressionTree::fit(
            &rows,
            &targets,
            None,
            &sample,
            &[0, 1],
            TreeConfig {
                min_n: 2,
                max_depth: 4,
                mtry: 2,
            },
            &mut rng,
        );
        assert!((tree.predict(&row(&[0])) - 1.0).abs() < 1e-12);
        assert!(tree.predict(&row(&[1])).abs() < 1e-12);
    }

    #[test]
    fn pure_node_becomes_a_leaf() {
        let rows = vec![row(&[0]); 8];
        let targets = vec![0.5; 8];
        let sample: Vec<usize> = (0..8).collect();
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let tree = RegressionTree::fit(
            &rows,
            &targets,
            None,
            &sample,
            &[0],
            TreeConfig {
                min_n: 2,
                max_depth: 4,
                mtry: 1,
            },
            &mut rng,
        );
        assert!((tree.predict(&row(&[0])) - 0.5).abs() < 1e-12);
        assert!((tree.predict(&row(&[])) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn min_n_stops_splitting() {
        let (rows, targets) = xor_free_data();
        let sample: Vec<usize> = (0..rows.len()).collect();
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let tree = RegressionTree::fit(
            &rows,
            &targets,
            None,
            &sample,
            &[0, 1],
            TreeConfig {
                min_n: 100,
                max_depth: 4,
                mtry: 2,
            },
            &mut rng,
        );
        // forced leaf: overall mean
        assert!((tree.predict(&row(&[0])) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn newton_leaves_divide_by_hessians() {
        let rows = vec![row(&[0]); 4];
        let targets = vec![0.2; 4];
        let hessians = vec![0.25; 4];
        let sample: Vec<usize> = (0..4).collect();
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let tree = RegressionTree::fit(
            &rows,
            &targets,
            Some(&hessians),
            &sample,
            &[0],
            TreeConfig {
                min_n: 2,
                max_depth: 1,
                mtry: 1,
            },
            &mut rng,
        );
        // 0.8 / (1.0 + eps)
        assert!((tree.predict(&row(&[0])) - 0.8).abs() < 1e-3);
    }
}
