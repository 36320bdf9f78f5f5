use std::path::PathBuf;

use plyfold_analysis::{class_balance::ClassBalance, openings, special_moves};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    /// Games CSV file
    #[arg(long)]
    data: PathBuf,
    /// Opening prefix depth in plies
    #[arg(long, default_value_t = 2)]
    depth: usize,
    /// How many openings to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg { data, depth, top } = arg;
    let table = util::load_clean_table(data)?;

    let balance = ClassBalance::from_table(&table);
    println!("Outcome balance ({} games):", balance.total());
    println!(
        "  White wins: {:6} ({:.1}%)",
        balance.white_wins,
        balance.white_proportion * 100.0
    );
    println!(
        "  Black wins: {:6} ({:.1}%)",
        balance.black_wins,
        balance.black_proportion * 100.0
    );

    let depths: Vec<usize> = (1..=*depth).collect();
    println!();
    println!("Opening prefix uniqueness:");
    for uniqueness in openings::prefix_uniqueness(&table, &depths) {
        println!(
            "  {:2} plies: {:6} distinct ({:.1}% of games)",
            uniqueness.depth,
            uniqueness.distinct,
            uniqueness.uniqueness_ratio * 100.0
        );
    }

    let prefixes = openings::prefix_table(&table, *depth);
    println!();
    println!("Most common {depth}-ply openings:");
    for (prefix, count) in prefixes.top(*top) {
        println!(
            "  {count:6} ({:5.1}%)  {prefix}",
            prefixes.proportion_of(prefix) * 100.0
        );
    }

    println!();
    println!("Black-win rate by special move:");
    for rate in special_moves::all_conditional_win_rates(&table) {
        println!(
            "  {:8} with: {:.3} (n={}), without: {:.3} (n={})",
            rate.word,
            rate.with_black_win_rate,
            rate.with_count,
            rate.without_black_win_rate,
            rate.without_count
        );
    }

    Ok(())
}
