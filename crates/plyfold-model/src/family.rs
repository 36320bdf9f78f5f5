use std::fmt;

use serde::{Deserialize, Serialize};

/// The four tuned model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    LogisticRegression,
    RandomForest,
    BoostedTrees,
    LinearSvm,
}

/// How a family's features are prepared before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// Categorical columns are one-hot expanded up front.
    Indicator,
    /// Columns are passed through untouched; the fit routine expands
    /// internally. Used by the SVM only.
    Identity,
}

impl ModelFamily {
    pub const ALL: [Self; 4] = [
        Self::LogisticRegression,
        Self::RandomForest,
        Self::BoostedTrees,
        Self::LinearSvm,
    ];

    /// The encoding recipe paired with this family.
    #[must_use]
    pub fn recipe(self) -> Recipe {
        match self {
            Self::LogisticRegression | Self::RandomForest | Self::BoostedTrees => {
                Recipe::Indicator
            }
            Self::LinearSvm => Recipe::Identity,
        }
    }

    /// Stable tag used for artifact file names.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic-regression",
            Self::RandomForest => "random-forest",
            Self::BoostedTrees => "boosted-trees",
            Self::LinearSvm => "linear-svm",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
