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
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
//! Shared utilities for preparing metric-space benchmark experiments.

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};

pub mod metrics;

pub use metrics::{Metric, ParMetric};

/// Configures the logger.
///
/// # Errors
///
/// - If a logs directory could not be located/created.
/// - If the logger could not be initialized.
pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, std::path::PathBuf), String> {
    let root_dir = std::path::PathBuf::from(".")
        .canonicalize()
        .map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(format!("{file_name}.log"));

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_path = log_path.with_extension("err.log");

    let guard = ftlog::Builder::new()
        // global max log level
        .max_log_level(LevelFilter::Info)
        // define root appender, pass None would write to stderr
        .root(writer)
        // write `Debug` and higher logs in ftlog::appender to `err_path` instead of `log_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Debug)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

/// The datasets for which experiments can be prepared.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum RawData {
    /// The LA geographic feature-vector dataset.
    #[clap(name = "la")]
    LA,
    /// The Words dictionary dataset.
    #[clap(name = "words")]
    Words,
    /// The Color histogram dataset (MPEG-7 features).
    #[clap(name = "color")]
    Color,
    /// The Synthetic uniform-vector dataset.
    #[clap(name = "synthetic")]
    Synthetic,
}

/// The on-disk layout of a raw dataset file.
///
/// The format is bound to each dataset in the registry rather than sniffed
/// from file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// The first line holds the dimensionality; every following line is a
    /// space-separated vector of that many floats.
    Headered,
    /// Every line is a space-separated float vector; the dimensionality is
    /// inferred from the first parsed row.
    Headerless,
    /// One string per line.
    Lines,
}

impl RawData {
    /// All datasets in the registry.
    pub const ALL: [Self; 4] = [Self::LA, Self::Words, Self::Color, Self::Synthetic];

    /// The name of the dataset.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::LA => "LA",
            Self::Words => "Words",
            Self::Color => "Color",
            Self::Synthetic => "Synthetic",
        }
    }

    /// The name of the metric bound to the dataset.
    ///
    /// Each dataset has exactly one metric for the lifetime of a run.
    #[must_use]
    pub const fn metric(&self) -> &str {
        match self {
            Self::LA => "euclidean",
            Self::Words => "levenshtein",
            Self::Color => "manhattan",
            Self::Synthetic => "chebyshev",
        }
    }

    /// The on-disk format of the raw dataset file.
    #[must_use]
    pub const fn format(&self) -> DataFormat {
        match self {
            Self::LA | Self::Synthetic => DataFormat::Headered,
            Self::Color => DataFormat::Headerless,
            Self::Words => DataFormat::Lines,
        }
    }

    /// Whether the dataset is of vectors.
    #[must_use]
    pub const fn is_tabular(&self) -> bool {
        matches!(self, Self::LA | Self::Color | Self::Synthetic)
    }

    /// Whether the dataset is of strings.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Words)
    }
}
