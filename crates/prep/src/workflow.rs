//! Per-dataset orchestration of the preparation pipeline.
//!
//! Every stage is a single deterministic pass; there are no retries. Each
//! dataset runs independently, so a failure here aborts only the caller's
//! current dataset.

use std::path::Path;

use distances::Number;

use prep_utils::ParMetric;

use crate::data::ParDataset;
use crate::{pivots, radii, reports, sample};

/// The parameterization of one preparation run.
#[derive(Debug, Clone)]
pub struct Params {
    /// The number of queries to sample per dataset.
    pub num_queries: usize,
    /// The pivot counts to select per dataset.
    pub pivot_counts: Vec<usize>,
    /// The target selectivities for radius calibration.
    pub selectivities: Vec<f32>,
    /// Optional cap on the number of items distances are computed against
    /// during radius calibration.
    pub sample_cap: Option<usize>,
    /// The seed for the random number generator.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_queries: 100,
            pivot_counts: vec![3, 5, 10, 15, 20],
            selectivities: vec![0.02, 0.04, 0.08, 0.16, 0.32],
            sample_cap: None,
            seed: None,
        }
    }
}

/// Runs the full preparation pipeline for one dataset and writes its
/// artifact set under `out_dir`.
///
/// Stages, in order: draw the query sample, calibrate the radius table
/// against the queries, then select one pivot set per requested pivot
/// count. Artifacts are written as soon as each stage completes.
///
/// # Errors
///
/// * If any stage's input validation fails.
/// * If any artifact cannot be written.
pub fn prepare<I, T, D, M>(data: &D, metric: &M, params: &Params, out_dir: &Path) -> Result<(), String>
where
    I: Send + Sync,
    T: Number,
    D: ParDataset<I>,
    M: ParMetric<I, T>,
{
    let cardinality = data.cardinality();
    ftlog::info!(
        "Preparing {} ({cardinality} items) with the {} metric...",
        data.name(),
        metric.name()
    );

    let queries = sample::sample_indices(cardinality, params.num_queries, params.seed)?;
    let path = reports::write_queries(out_dir, data.name(), &queries)?;
    ftlog::info!("Wrote {} query indices to {path:?}.", queries.len());

    let index_sample = match params.sample_cap {
        Some(cap) if cap < cardinality => {
            ftlog::info!("Calibrating radii against a sample of {cap} items.");
            sample::sample_indices(cardinality, cap, index_sample_seed(params.seed))?
        }
        _ => (0..cardinality).collect(),
    };
    let table = radii::estimate(data, metric, &queries, &params.selectivities, &index_sample)?;
    let path = reports::write_radii(out_dir, data.name(), &table)?;
    ftlog::info!("Wrote {} radii to {path:?}.", table.len());

    for &p in &params.pivot_counts {
        let pivot_set = pivots::farthest_first(data, metric, p)?;
        let path = reports::write_pivots(out_dir, data.name(), &pivot_set)?;
        ftlog::info!("Wrote {p} pivots to {path:?}.");
    }

    ftlog::info!("Finished preparing {}.", data.name());
    Ok(())
}

/// The seed for the radius-calibration index sample.
///
/// Derived from the configured seed so that the index sample comes from a
/// different stream than the query sample; otherwise the two draws would be
/// prefixes of one another and a capped index sample could coincide with the
/// query set.
const fn index_sample_seed(seed: Option<u64>) -> Option<u64> {
    let seed = match seed {
        Some(seed) => seed,
        None => sample::DEFAULT_SEED,
    };
    Some(seed.wrapping_add(1))
}
