//! Stratified, seed-deterministic resampling
//!
//! The pipeline splits the cleaned table exactly once into disjoint
//! train/test partitions, then derives k stratified folds from the train
//! partition only. Both operations preserve class proportions within
//! rounding and are bit-for-bit reproducible: the same seed and the same
//! input order always produce the same partitions.
//!
//! Rows are identified by their index into the cleaned table; classes are
//! given as class indices in row order. All shuffling runs on a
//! [`rand_pcg::Pcg64Mcg`] seeded explicitly.
//!
//! # Examples
//!
//! ```
//! use plyfold_resample::ResamplePlan;
//!
//! let classes = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
//! let plan = ResamplePlan::generate(&classes, 0.5, 2, 42);
//! assert_eq!(plan.split.train.len(), 5);
//! assert_eq!(plan.split.test.len(), 5);
//! assert_eq!(plan.folds.k(), 2);
//! ```

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

/// Disjoint train/test partition over table row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Row indices in the training partition.
    pub train: Vec<usize>,
    /// Row indices in the test partition.
    pub test: Vec<usize>,
}

/// Stratified k-fold assignment over a set of row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folds {
    fold_of: Vec<(usize, usize)>,
    k: usize,
}

impl Folds {
    /// Number of folds.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Row indices held out for validation in the given fold.
    #[must_use]
    pub fn validation(&self, fold: usize) -> Vec<usize> {
        assert!(fold < self.k);
        self.fold_of
            .iter()
            .filter(|&&(_, f)| f == fold)
            .map(|&(row, _)| row)
            .collect()
    }

    /// Row indices used for fitting in the given fold (everything not
    /// held out).
    #[must_use]
    pub fn training(&self, fold: usize) -> Vec<usize> {
        assert!(fold < self.k);
        self.fold_of
            .iter()
            .filter(|&&(_, f)| f != fold)
            .map(|&(row, _)| row)
            .collect()
    }
}

/// A complete resampling plan: the one split plus the folds derived from
/// its training partition, all from a single seed.
#[derive(Debug, Clone)]
pub struct ResamplePlan {
    pub split: TrainTestSplit,
    pub folds: Folds,
}

impl ResamplePlan {
    /// Generates the split and folds from one seed.
    ///
    /// `classes[i]` is the class index of table row `i`. The split and
    /// the fold assignment consume the generator sequentially, so the
    /// whole plan is a pure function of `(classes, train_proportion, k,
    /// seed)`.
    #[must_use]
    pub fn generate(classes: &[usize], train_proportion: f64, k: usize, seed: u64) -> Self {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let split = stratified_split(&mut rng, classes, train_proportion);
        let folds = stratified_folds(&mut rng, &split.train, classes, k);
        Self { split, folds }
    }
}

/// Stratified train/test split.
///
/// Each class is shuffled independently. Per-class train counts come from
/// largest-remainder allocation against `round(total * train_proportion)`,
/// which keeps class proportions within one row of the source proportion
/// while hitting the overall train size exactly.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stratified_split<R>(rng: &mut R, classes: &[usize], train_proportion: f64) -> TrainTestSplit
where
    R: Rng + ?Sized,
{
    assert!(
        (0.0..=1.0).contains(&train_proportion),
        "train proportion must be in [0, 1]"
    );

    let groups = group_by_class(classes);
    let total_train = (classes.len() as f64 * train_proportion).round() as usize;

    // Floor each class target, then hand the leftover slots to the
    // classes with the largest fractional remainders (ties by class
    // order, which BTreeMap fixes).
    let mut targets: Vec<(usize, usize, f64)> = groups
        .iter()
        .map(|(&class, rows)| {
            let exact = rows.len() as f64 * train_proportion;
            (class, exact.floor() as usize, exact.fract())
        })
        .collect();
    let mut assigned: usize = targets.iter().map(|&(_, floor, _)| floor).sum();
    let mut order: Vec<usize> = (0..targets.len()).collect();
    order.sort_by(|&a, &b| targets[b].2.partial_cmp(&targets[a].2).unwrap());
    for &slot in &order {
        if assigned >= total_train {
            break;
        }
        targets[slot].1 += 1;
        assigned += 1;
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for ((_, rows), &(_, take, _)) in groups.iter().zip(&targets) {
        let mut rows = rows.clone();
        rows.shuffle(rng);
        train.extend_from_slice(&rows[..take.min(rows.len())]);
        test.extend_from_slice(&rows[take.min(rows.len())..]);
    }
    train.sort_unstable();
    test.sort_unstable();

    TrainTestSplit { train, test }
}

/// Stratified k-fold assignment over `rows`.
///
/// Each class's rows are shuffled and dealt round-robin across folds, so
/// every fold's class counts differ by at most one from perfect
/// proportionality, the folds are disjoint, and their union is `rows`.
pub fn stratified_folds<R>(rng: &mut R, rows: &[usize], classes: &[usize], k: usize) -> Folds
where
    R: Rng + ?Sized,
{
    assert!(k >= 2, "need at least two folds");

    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &row in rows {
        groups.entry(classes[row]).or_default().push(row);
    }

    let mut fold_of = Vec::with_capacity(rows.len());
    for (_, mut class_rows) in groups {
        class_rows.shuffle(rng);
        for (i, row) in class_rows.into_iter().enumerate() {
            fold_of.push((row, i % k));
        }
    }
    fold_of.sort_unstable();

    Folds { fold_of, k }
}

fn group_by_class(classes: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &class) in classes.iter().enumerate() {
        groups.entry(class).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_classes(n: usize) -> Vec<usize> {
        (0..n).map(|i| i % 2).collect()
    }

    fn class_count(rows: &[usize], classes: &[usize], class: usize) -> usize {
        rows.iter().filter(|&&r| classes[r] == class).count()
    }

    #[test]
    fn toy_balanced_half_split() {
        // 10 balanced rows at 50% yields 5/5 with balance preserved
        // within rounding.
        let classes = balanced_classes(10);
        let plan = ResamplePlan::generate(&classes, 0.5, 2, 7);
        assert_eq!(plan.split.train.len(), 5);
        assert_eq!(plan.split.test.len(), 5);
        for class in [0, 1] {
            let in_train = class_count(&plan.split.train, &classes, class);
            assert!((2..=3).contains(&in_train));
        }
    }

    #[test]
    fn split_partitions_all_rows() {
        let classes = balanced_classes(101);
        let plan = ResamplePlan::generate(&classes, 0.75, 5, 1);
        let mut all: Vec<usize> = plan
            .split
            .train
            .iter()
            .chain(&plan.split.test)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..101).collect::<Vec<_>>());
    }

    #[test]
    fn split_preserves_class_proportion() {
        // 70/30 class mix must survive the split within one percent.
        let classes: Vec<usize> = (0..1000).map(|i| usize::from(i % 10 >= 7)).collect();
        let plan = ResamplePlan::generate(&classes, 0.75, 10, 99);
        #[expect(clippy::cast_precision_loss)]
        let prop = |rows: &[usize]| {
            class_count(rows, &classes, 1) as f64 / rows.len() as f64
        };
        assert!((prop(&plan.split.train) - 0.3).abs() < 0.01);
        assert!((prop(&plan.split.test) - 0.3).abs() < 0.01);
    }

    #[test]
    fn folds_are_disjoint_and_cover_training() {
        let classes = balanced_classes(97);
        let plan = ResamplePlan::generate(&classes, 0.8, 5, 3);

        let mut seen = Vec::new();
        for fold in 0..plan.folds.k() {
            let validation = plan.folds.validation(fold);
            let training = plan.folds.training(fold);
            assert!(validation.iter().all(|row| !training.contains(row)));
            assert_eq!(validation.len() + training.len(), plan.split.train.len());
            seen.extend(validation);
        }
        seen.sort_unstable();
        let mut expected = plan.split.train.clone();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn folds_stay_stratified() {
        let classes = balanced_classes(100);
        let plan = ResamplePlan::generate(&classes, 0.8, 4, 11);
        for fold in 0..plan.folds.k() {
            let validation = plan.folds.validation(fold);
            let ones = class_count(&validation, &classes, 1);
            let zeros = validation.len() - ones;
            assert!(ones.abs_diff(zeros) <= 1);
        }
    }

    #[test]
    fn identical_seed_reproduces_identical_partitions() {
        let classes = balanced_classes(250);
        let a = ResamplePlan::generate(&classes, 0.75, 10, 2024);
        let b = ResamplePlan::generate(&classes, 0.75, 10, 2024);
        assert_eq!(a.split, b.split);
        assert_eq!(a.folds, b.folds);

        let c = ResamplePlan::generate(&classes, 0.75, 10, 2025);
        assert_ne!(a.split, c.split);
    }
}
