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
//! Preparation of deterministic experiment inputs for metric-space search
//! benchmarks.
//!
//! For each dataset, one batch run derives three kinds of immutable
//! artifacts, consumed by external benchmark code:
//!
//! - a reproducible uniform sample of query indices,
//! - a table of query radii calibrated to target result-set selectivities,
//! - pivot sets chosen with the greedy farthest-first heuristic, one per
//!   requested pivot count.

pub mod data;
pub mod pivots;
pub mod radii;
pub mod reports;
pub mod sample;
pub mod utils;
pub mod workflow;
