use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use max_paths::{
    error::SearchError,
    graphs::{graph_factory::GraphFactory, RecordFormat, Weight},
    utility::get_progressspinner,
};
use rand::{rngs::StdRng, SeedableRng};

/// Turns a number triangle into an initial graph for max_search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number triangle, one row per line. A random triangle is generated if
    /// omitted
    #[arg(short, long)]
    triangle: Option<PathBuf>,
    /// Rows of the random triangle
    #[arg(long, default_value = "100")]
    rows: u32,
    /// Largest weight of the random triangle
    #[arg(long, default_value = "99", value_parser = clap::value_parser!(i64).range(0..))]
    max_weight: Weight,
    /// Seed of the random triangle
    #[arg(long)]
    seed: Option<u64>,
    /// Outfile for the graph
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(short, long, value_enum, default_value_t = RecordFormat::Text)]
    format: RecordFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SearchError> {
    let start = Instant::now();
    let records = match &args.triangle {
        Some(path) => GraphFactory::from_triangle_file(path)?,
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let rows = GraphFactory::random_triangle_rows(args.rows, args.max_weight, &mut rng);
            GraphFactory::from_triangle_rows(&rows)
        }
    };
    println!("it took {:?} to build {} vertices", start.elapsed(), records.len());

    let spinner = get_progressspinner("Writing graph");
    args.format.write_records(&args.graph, &records)?;
    spinner.finish_and_clear();

    Ok(())
}
