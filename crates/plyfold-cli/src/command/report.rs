use std::path::PathBuf;

use anyhow::{Context as _, bail};
use plyfold_model::family::ModelFamily;
use plyfold_resample::ResamplePlan;
use plyfold_tune::{artifact::TuningArtifact, evaluate, select};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Games CSV file (must be the file the artifacts were tuned on)
    #[arg(long)]
    data: PathBuf,
    /// Directory holding the per-family tuning artifacts
    #[arg(long, default_value = "artifacts")]
    artifacts: PathBuf,
    /// Fraction of games assigned to the training partition; must match
    /// the tuning run
    #[arg(long, default_value_t = 0.75)]
    train_prop: f64,
    /// How many grid points to show per ranking table
    #[arg(long, default_value_t = 5)]
    top: usize,
    /// Where to write the final report JSON (stdout when absent)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        data,
        artifacts: artifacts_dir,
        train_prop,
        top,
        output,
    } = arg;

    let mut artifacts = Vec::new();
    for family in ModelFamily::ALL {
        let path = artifacts_dir.join(format!("{}.json", family.tag()));
        if !path.exists() {
            eprintln!("No artifact for {family}, skipping ({})", path.display());
            continue;
        }
        artifacts.push(util::read_artifact_file(&path)?);
    }
    if artifacts.is_empty() {
        bail!(
            "no tuning artifacts found in {}; run `plyfold tune` first",
            artifacts_dir.display()
        );
    }

    let (seed, folds) = (artifacts[0].seed, artifacts[0].folds);
    for artifact in &artifacts {
        if artifact.seed != seed || artifact.folds != folds {
            bail!(
                "artifact for {} was tuned with seed {} over {} folds, \
                 others with seed {seed} over {folds} folds; \
                 re-tune with one seed before reporting",
                artifact.family,
                artifact.seed,
                artifact.folds
            );
        }
    }
    util::check_split_params(*train_prop, folds)?;

    for artifact in &artifacts {
        eprintln!("{} (top {top} of {}):", artifact.family, artifact.results.len());
        for ranked in select::rank(artifact).iter().take(*top) {
            eprintln!(
                "  mean AUC {:.4} +/- {:.4}  {}",
                ranked.summary.mean,
                ranked.summary.std_err,
                ranked.point.describe()
            );
        }
        eprintln!();
    }

    let selection = select::select(&artifacts).context("no rankable grid points")?;
    eprintln!(
        "Selected: {} [{}] at mean validation AUC {:.4}",
        selection.family,
        selection.best.point.describe(),
        selection.best.summary.mean
    );

    let table = util::load_clean_table(data)?;
    let classes: Vec<usize> = table
        .records()
        .iter()
        .map(|r| r.outcome.class_index())
        .collect();
    // Same generator arguments as the tuning run, so the test partition
    // is the one the tuned models never saw.
    let plan = ResamplePlan::generate(&classes, *train_prop, folds, seed);
    util::ensure_fittable(&table, &plan)?;

    eprintln!("Refitting on {} training games...", plan.split.train.len());
    let report = evaluate::evaluate(&table, &plan.split, &selection, seed);

    eprintln!();
    eprintln!("Test evaluation ({} games):", report.test_size);
    eprintln!("  ROC AUC:  {:.4}", report.test_auc);
    eprintln!(
        "  Accuracy: {:.4} at threshold {}",
        report.confusion.accuracy(),
        evaluate::DECISION_THRESHOLD
    );
    eprintln!("  Confusion (positive = black win):");
    eprintln!(
        "    TP {:6}  FN {:6}",
        report.confusion.true_positives, report.confusion.false_negatives
    );
    eprintln!(
        "    FP {:6}  TN {:6}",
        report.confusion.false_positives, report.confusion.true_negatives
    );
    eprintln!("  ROC curve: {} points", report.roc.points.len());

    // stdout when no --output is given
    Output::save_json(&report, output.clone())?;
    if let Some(path) = output {
        eprintln!("Report written: {}", path.display());
    }

    Ok(())
}
