//! Model families for chess-outcome classification
//!
//! Four binary classifiers over categorical move columns, each producing
//! a probability-scale score for the positive class (black win):
//!
//! - [`logistic`]: elastic-net regularized logistic regression
//! - [`forest`]: random forest of probability trees
//! - [`boost`]: gradient-boosted trees with logistic loss
//! - [`svm`]: L2-regularized linear support-vector machine
//!
//! # Encoding Recipes
//!
//! The first three families consume pre-expanded indicator rows built by
//! [`recipe::IndicatorEncoder`] against a training vocabulary. The SVM is
//! the exception: its fit routine expands categorical columns internally,
//! so it takes encoded (unexpanded) rows directly. Feeding it indicator
//! rows would expand twice; the split API makes that mistake a type error
//! rather than a runtime hazard.
//!
//! # Determinism
//!
//! Every stochastic fit (bootstrap samples, per-split feature draws,
//! epoch shuffles) runs on a `Pcg64Mcg` seeded from the configuration, so
//! a configuration plus a dataset fully determines the fitted model.
//!
//! [`metrics`] holds the validation surface: ROC AUC, the ROC curve, and
//! the confusion matrix.

pub mod boost;
pub mod family;
pub mod forest;
pub mod logistic;
pub mod metrics;
pub mod recipe;
pub(crate) mod tree;
pub mod svm;
