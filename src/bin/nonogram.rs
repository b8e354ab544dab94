//! Command-line nonogram solver over the textual clue format.

use std::{fs, path::PathBuf};

use clap::Parser;
use tessera::{
    nonogram::{self, parse_puzzle},
    solver::{engine::SearchLimits, stats::render_stats_table},
};

#[derive(Debug, Parser)]
#[command(name = "nonogram", about = "Solve a nonogram puzzle from its clue file")]
struct Args {
    /// Puzzle description: a `<rows> <cols>` header, then row clues, then
    /// column clues.
    input: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print solver counters after the result.
    #[arg(long)]
    stats: bool,

    /// Emit the result and counters as JSON.
    #[arg(long)]
    json: bool,

    /// Abort after this many search decisions.
    #[arg(long)]
    max_decisions: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.input)?;
    let puzzle = parse_puzzle(&text)?;

    let limits = SearchLimits {
        max_decisions: args.max_decisions,
        cancel: None,
    };
    let (grid, stats) = puzzle.solve_with_limits(limits)?;

    let report = if args.json {
        let grid_lines: Option<Vec<String>> = grid.as_ref().map(|grid| {
            grid.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect()
        });
        let value = serde_json::json!({
            "solved": grid.is_some(),
            "grid": grid_lines,
            "stats": stats,
        });
        format!("{value:#}\n")
    } else {
        match &grid {
            Some(grid) => nonogram::render_grid(grid),
            None => "No solution found!\n".to_string(),
        }
    };

    match &args.output {
        Some(path) => fs::write(path, &report)?,
        None => print!("{report}"),
    }

    if args.stats && !args.json {
        println!("{}", render_stats_table(&stats));
    }

    Ok(())
}
