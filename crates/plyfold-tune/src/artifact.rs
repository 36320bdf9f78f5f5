//! Persisted tuning results
//!
//! A tuning artifact is the write-once bridge between the slow batch
//! stage and the fast reporting stage: one JSON document per family
//! holding every grid point's per-fold validation metrics, stamped with
//! a schema version, the tuning seed, and the creation time. Reporting
//! refuses artifacts it cannot interpret instead of silently mixing
//! incompatible runs.

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use plyfold_model::family::ModelFamily;

use crate::engine::GridPointResult;

/// Current artifact schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the metric every artifact records.
pub const METRIC_NAME: &str = "roc_auc";

/// One family's complete tuning output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningArtifact {
    /// Schema version; see [`SCHEMA_VERSION`].
    pub schema_version: u32,
    /// The family this artifact tunes.
    pub family: ModelFamily,
    /// Name of the recorded metric (always [`METRIC_NAME`] today).
    pub metric: String,
    /// When the tuning run finished.
    pub created_at: DateTime<Utc>,
    /// Seed the whole run was derived from.
    pub seed: u64,
    /// Fold count the metrics were collected over.
    pub folds: usize,
    /// Per grid point metrics, in grid construction order.
    pub results: Vec<GridPointResult>,
}

impl TuningArtifact {
    /// Assembles an artifact for a finished run, stamped now.
    #[must_use]
    pub fn new(
        family: ModelFamily,
        seed: u64,
        folds: usize,
        results: Vec<GridPointResult>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            family,
            metric: METRIC_NAME.to_owned(),
            created_at: Utc::now(),
            seed,
            folds,
            results,
        }
    }

    /// Checks the artifact is interpretable by this build before any of
    /// its metrics are used.
    ///
    /// # Errors
    ///
    /// Returns an [`ArtifactError`] when the schema version is unknown,
    /// the metric is not ROC AUC, a result belongs to a different
    /// family, or a fold-metric vector disagrees with the fold count.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ArtifactError::SchemaVersion {
                found: self.schema_version,
            });
        }
        if self.metric != METRIC_NAME {
            return Err(ArtifactError::Metric {
                found: self.metric.clone(),
            });
        }
        if self.results.is_empty() {
            return Err(ArtifactError::Empty);
        }
        for result in &self.results {
            if result.point.family() != self.family {
                return Err(ArtifactError::FamilyMismatch {
                    expected: self.family,
                    found: result.point.family(),
                });
            }
            if result.fold_metrics.len() != self.folds {
                return Err(ArtifactError::FoldCount {
                    expected: self.folds,
                    found: result.fold_metrics.len(),
                });
            }
        }
        Ok(())
    }
}

/// Reasons an artifact is rejected at load time.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[display("unsupported artifact schema version {found} (expected {SCHEMA_VERSION})")]
    SchemaVersion { found: u32 },
    #[display("unsupported metric {found:?} (expected {METRIC_NAME:?})")]
    Metric { found: String },
    #[display("artifact contains no grid point results")]
    Empty,
    #[display("artifact family {expected} contains a {found} grid point")]
    FamilyMismatch {
        expected: ModelFamily,
        found: ModelFamily,
    },
    #[display("expected {expected} fold metrics per grid point, found {found}")]
    FoldCount { expected: usize, found: usize },
}
