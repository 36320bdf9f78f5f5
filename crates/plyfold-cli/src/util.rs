use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use plyfold_data::{loader, record::GameTable};
use plyfold_resample::ResamplePlan;
use plyfold_tune::artifact::TuningArtifact;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read and validate a tuning artifact from a JSON file
///
/// # Arguments
///
/// * `path` - Path to the artifact JSON file
///
/// # Returns
///
/// Validated tuning artifact
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if the
/// artifact fails schema validation
pub fn read_artifact_file<P>(path: P) -> anyhow::Result<TuningArtifact>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let artifact: TuningArtifact = read_json_file("tuning artifact", path)?;
    artifact
        .validate()
        .with_context(|| format!("Invalid tuning artifact: {}", path.display()))?;
    Ok(artifact)
}

/// Load the game table from a CSV file, printing cleaning counts.
pub fn load_clean_table<P>(path: P) -> anyhow::Result<GameTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let (table, stats) = loader::load_game_table(path)
        .with_context(|| format!("Failed to load games file: {}", path.display()))?;
    eprintln!("Loaded {} rows from {}", stats.total_rows, path.display());
    eprintln!("  Kept: {} games", stats.kept);
    eprintln!("  Dropped (draw or missing result): {}", stats.dropped_result);
    eprintln!("  Dropped (incomplete game): {}", stats.dropped_incomplete);
    Ok(table)
}

/// Reject split parameters the resampler cannot honor.
pub fn check_split_params(train_prop: f64, folds: usize) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&train_prop) {
        bail!("--train-prop must be within [0, 1], got {train_prop}");
    }
    if folds < 2 {
        bail!("need at least 2 folds, got {folds}");
    }
    Ok(())
}

/// Reject plans that would hand an empty row set to a fit routine.
///
/// Cleaning drops rows silently, so an all-draw or all-incomplete input
/// file is valid and arrives here as an empty table. Small inputs can
/// also leave a partition or a fold subset empty. The fit routines
/// require at least one row, so the problem must surface as a CLI error
/// before any of them runs.
pub fn ensure_fittable(table: &GameTable, plan: &ResamplePlan) -> anyhow::Result<()> {
    if table.is_empty() {
        bail!("no games survived cleaning; nothing to fit");
    }
    if plan.split.train.is_empty() || plan.split.test.is_empty() {
        bail!(
            "split left a partition empty ({} train / {} test); \
             adjust --train-prop or provide more games",
            plan.split.train.len(),
            plan.split.test.len()
        );
    }
    for fold in 0..plan.folds.k() {
        if plan.folds.training(fold).is_empty() || plan.folds.validation(fold).is_empty() {
            bail!(
                "fold {fold} has an empty subset ({} training games over {} folds); \
                 lower --folds or provide more games",
                plan.split.train.len(),
                plan.folds.k()
            );
        }
    }
    Ok(())
}
