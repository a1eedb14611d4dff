//! `depeval` — compare a system-produced dependency corpus against a gold
//! standard and print per-label LAS/UAS/LS.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deppipe::{ColumnLayout, DepEvaluator};

#[derive(Parser, Debug)]
#[command(
    name = "depeval",
    version,
    about = "Dependency-accuracy evaluation (LAS / UAS / LS)"
)]
struct Args {
    /// The gold-standard file
    #[arg(short = 'g', long = "gold", value_name = "FILE")]
    gold: PathBuf,

    /// The system file
    #[arg(short = 's', long = "system", value_name = "FILE")]
    system: PathBuf,

    /// Column index of the gold head id
    #[arg(long = "gh", value_name = "INDEX")]
    gold_head: usize,

    /// Column index of the gold dependency label
    #[arg(long = "gd", value_name = "INDEX")]
    gold_deprel: usize,

    /// Column index of the system head id
    #[arg(long = "sh", value_name = "INDEX")]
    system_head: usize,

    /// Column index of the system dependency label
    #[arg(long = "sd", value_name = "INDEX")]
    system_deprel: usize,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let evaluator = DepEvaluator::new(
        ColumnLayout::new(args.gold_head, args.gold_deprel),
        ColumnLayout::new(args.system_head, args.system_deprel),
    );
    let report = evaluator.evaluate_paths(&args.gold, &args.system)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
