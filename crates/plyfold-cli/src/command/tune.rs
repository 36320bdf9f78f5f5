use std::{fs, path::PathBuf};

use anyhow::Context;
use plyfold_model::family::ModelFamily;
use plyfold_resample::ResamplePlan;
use plyfold_tune::{
    artifact::TuningArtifact,
    engine::TuningRun,
    select,
};

use crate::util::{self, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FamilyArg {
    LogisticRegression,
    RandomForest,
    BoostedTrees,
    LinearSvm,
}

impl From<FamilyArg> for ModelFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::LogisticRegression => Self::LogisticRegression,
            FamilyArg::RandomForest => Self::RandomForest,
            FamilyArg::BoostedTrees => Self::BoostedTrees,
            FamilyArg::LinearSvm => Self::LinearSvm,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TuneArg {
    /// Games CSV file
    #[arg(long)]
    data: PathBuf,
    /// Directory the per-family artifacts are written to
    #[arg(long, default_value = "artifacts")]
    out_dir: PathBuf,
    /// Tune a single family instead of all four
    #[arg(long)]
    family: Option<FamilyArg>,
    /// Seed for the split, the folds, and every stochastic fit
    #[arg(long, default_value_t = 2024)]
    seed: u64,
    /// Number of cross-validation folds
    #[arg(long, default_value_t = 10)]
    folds: usize,
    /// Fraction of games assigned to the training partition
    #[arg(long, default_value_t = 0.75)]
    train_prop: f64,
}

pub(crate) fn run(arg: &TuneArg) -> anyhow::Result<()> {
    let TuneArg {
        data,
        out_dir,
        family,
        seed,
        folds,
        train_prop,
    } = arg;

    util::check_split_params(*train_prop, *folds)?;
    let table = util::load_clean_table(data)?;
    let classes: Vec<usize> = table
        .records()
        .iter()
        .map(|r| r.outcome.class_index())
        .collect();
    let plan = ResamplePlan::generate(&classes, *train_prop, *folds, *seed);
    util::ensure_fittable(&table, &plan)?;
    eprintln!(
        "Partitioned: {} train / {} test, {} folds (seed {seed})",
        plan.split.train.len(),
        plan.split.test.len(),
        plan.folds.k()
    );

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let families: Vec<ModelFamily> = match family {
        Some(family) => vec![(*family).into()],
        None => ModelFamily::ALL.to_vec(),
    };

    let run = TuningRun::new(&table, &plan.folds, *seed);
    for family in families {
        eprintln!();
        eprintln!("Tuning {family}:");
        let results = run.evaluate_family(family, |done, total| {
            eprintln!("  [{done:2}/{total}] grid points evaluated");
        });

        let artifact = TuningArtifact::new(family, *seed, *folds, results);
        if let Some(best) = select::best_of(&artifact) {
            eprintln!(
                "  Best: {} (mean AUC {:.4} +/- {:.4})",
                best.point.describe(),
                best.summary.mean,
                best.summary.std_err
            );
        }

        let path = out_dir.join(format!("{}.json", family.tag()));
        Output::save_json(&artifact, Some(path.clone()))?;
        eprintln!("  Artifact written: {}", path.display());
    }

    Ok(())
}
