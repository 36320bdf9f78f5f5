use clap::{Parser, Subcommand};

use self::{explore::ExploreArg, report::ReportArg, tune::TuneArg};

mod explore;
mod report;
mod tune;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What stage of the pipeline to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Descriptive statistics over the cleaned game table
    Explore(#[clap(flatten)] ExploreArg),
    /// Cross-validated grid search, persisted as per-family artifacts
    Tune(#[clap(flatten)] TuneArg),
    /// Rank tuning artifacts, refit the winner, score the test partition
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Tune(arg) => tune::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}
