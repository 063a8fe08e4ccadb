#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
//! Prepares pivots, queries, and radii for metric-space benchmarks.

use std::path::{Path, PathBuf};

use clap::Parser;

use bench_prep::data::readers;
use bench_prep::workflow;
use prep_utils::metrics::{Chebyshev, Euclidean, Levenshtein, Manhattan};
use prep_utils::{DataFormat, ParMetric, RawData};

/// Deterministic experiment inputs for metric-space search benchmarks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the directory holding the raw dataset files.
    #[arg(short('i'), long)]
    inp_dir: PathBuf,

    /// The datasets to prepare. Defaults to the full registry.
    #[arg(short('d'), long, num_args(1..))]
    datasets: Option<Vec<RawData>>,

    /// The number of queries to sample per dataset.
    #[arg(short('q'), long, default_value = "100")]
    num_queries: usize,

    /// The pivot counts to select per dataset.
    #[arg(short('p'), long, num_args(1..), default_values_t = [3, 5, 10, 15, 20])]
    pivot_counts: Vec<usize>,

    /// The target selectivities for radius calibration.
    #[arg(short('t'), long, num_args(1..), default_values_t = [0.02, 0.04, 0.08, 0.16, 0.32])]
    selectivities: Vec<f32>,

    /// Cap on the number of items used for radius calibration.
    #[arg(short('m'), long)]
    sample_cap: Option<usize>,

    /// The seed for the random number generator.
    #[arg(short('s'), long)]
    seed: Option<u64>,

    /// Path to the output directory.
    #[arg(short('o'), long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = prep_utils::configure_logger("bench-prep")?;
    println!("Log file: {log_path:?}");

    ftlog::info!("{args:?}");

    let inp_dir = args.inp_dir.canonicalize().map_err(|e| e.to_string())?;
    ftlog::info!("Input directory: {inp_dir:?}");

    let out_dir = if let Some(out_dir) = args.out_dir {
        out_dir
    } else {
        ftlog::info!("No output directory specified. Using default.");
        inp_dir
            .parent()
            .ok_or("No parent directory of `inp_dir`")?
            .join("prepared-experiments")
    };
    if !out_dir.exists() {
        std::fs::create_dir_all(&out_dir).map_err(|e| e.to_string())?;
    }
    let out_dir = out_dir.canonicalize().map_err(|e| e.to_string())?;
    ftlog::info!("Output directory: {out_dir:?}");

    let params = workflow::Params {
        num_queries: args.num_queries,
        pivot_counts: args.pivot_counts,
        selectivities: args.selectivities,
        sample_cap: args.sample_cap,
        seed: args.seed,
    };

    // Datasets are prepared independently; one failing must not block the
    // rest.
    let datasets = args.datasets.unwrap_or_else(|| RawData::ALL.to_vec());
    let mut failures = Vec::new();
    for dataset in datasets {
        if let Err(e) = prepare_dataset(dataset, &inp_dir, &out_dir, &params) {
            ftlog::error!("Failed to prepare {}: {e}", dataset.name());
            failures.push(dataset.name().to_string());
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("Failed to prepare dataset(s): {}.", failures.join(", ")))
    }
}

/// Reads one dataset, binds its metric, and runs the preparation pipeline.
fn prepare_dataset(dataset: RawData, inp_dir: &Path, out_dir: &Path, params: &workflow::Params) -> Result<(), String> {
    let inp_path = inp_dir.join(format!("{}.txt", dataset.name()));
    ftlog::info!("Reading {} from {inp_path:?}...", dataset.name());

    match dataset.format() {
        DataFormat::Headered => {
            let data = readers::read_headered(&inp_path)?.with_name(dataset.name());
            workflow::prepare(&data, &vector_metric(dataset)?, params, out_dir)
        }
        DataFormat::Headerless => {
            let data = readers::read_headerless(&inp_path)?.with_name(dataset.name());
            workflow::prepare(&data, &vector_metric(dataset)?, params, out_dir)
        }
        DataFormat::Lines => {
            let data = readers::read_lines(&inp_path)?.with_name(dataset.name());
            match dataset.metric() {
                "levenshtein" => workflow::prepare(&data, &Levenshtein, params, out_dir),
                name => Err(format!("Unknown sequence metric: {name}")),
            }
        }
    }
}

/// Binds a vector dataset to its registered metric.
fn vector_metric(dataset: RawData) -> Result<Box<dyn ParMetric<Vec<f32>, f32>>, String> {
    match dataset.metric() {
        "euclidean" => Ok(Box::new(Euclidean)),
        "manhattan" => Ok(Box::new(Manhattan)),
        "chebyshev" => Ok(Box::new(Chebyshev)),
        name => Err(format!("Unknown vector metric: {name}")),
    }
}
