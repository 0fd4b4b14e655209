use std::{fs::File, io::BufWriter, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use max_paths::{
    config::JobConfig,
    engine::{local::LocalEngine, round_store::RoundStore},
    error::SearchError,
    search::{
        driver::{SearchOutcome, SuperstepDriver},
        path::validate_path,
    },
    utility::{get_progressbar_long_jobs, get_progressspinner, ProgressSink},
};
use tracing_subscriber::EnvFilter;

/// Searches the heaviest path of a vertex-weighted DAG in bulk-synchronous
/// rounds and writes every round to the output directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Job description in .json format
    #[arg(short, long)]
    config: PathBuf,
    /// Stop after this many rounds
    #[arg(short = 'i', long)]
    rounds: Option<u32>,
    /// Worker threads
    #[arg(short, long)]
    mappers: Option<usize>,
    /// Partitions per round
    #[arg(short, long)]
    reducers: Option<usize>,
    /// Writes a summary of the search in .json format
    #[arg(short, long)]
    summary: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(outcome) if outcome.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(error) => {
            eprintln!("error: {}", error);
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<SearchOutcome, SearchError> {
    let mut job = JobConfig::from_file(&args.config)?;
    if let Some(rounds) = args.rounds {
        job.search.round_budget = Some(rounds);
    }
    if let Some(mappers) = args.mappers {
        job.search.parallelism = Some(mappers);
    }
    if let Some(reducers) = args.reducers {
        job.search.partitions = reducers;
    }

    let start = Instant::now();
    let initial = job.graph_format.read_records(&job.initial_graph)?;
    println!("it took {:?} to load {} vertices", start.elapsed(), initial.len());

    let engine = LocalEngine::from_config(&job.search)?;
    let store = RoundStore::new(&job.output_dir, job.format)?;
    let bar = match job.search.round_budget {
        Some(budget) => get_progressbar_long_jobs("running rounds", budget as u64),
        None => get_progressspinner("running rounds"),
    };
    let mut sink = ProgressSink::new(store, bar);

    let start = Instant::now();
    let outcome = SuperstepDriver::new(&engine, &job.search).run(initial.clone(), &mut sink)?;
    let store = sink.into_inner();
    println!(
        "{:?} after {} rounds, took {:?}",
        outcome.termination,
        outcome.rounds,
        start.elapsed()
    );
    if let Some(last) = store.committed().last() {
        println!("last round written to {}", last.display());
    }

    let summary = outcome.summary();
    match &summary.heaviest_path {
        Some(path) => {
            println!("heaviest path {:?} with weight {}", path.vertices, path.distance);
            if let Err(reason) = validate_path(&initial, path) {
                tracing::warn!(reason = %reason, "heaviest path does not match the input graph");
            }
        }
        None => println!("no path found"),
    }

    if let Some(summary_path) = &args.summary {
        let writer = BufWriter::new(File::create(summary_path)?);
        serde_json::to_writer_pretty(writer, &summary)?;
    }

    Ok(outcome)
}
