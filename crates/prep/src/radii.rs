//! Calibration of query radii to target result-set selectivities.
//!
//! For a range query centered at a typical sampled query point, the radius
//! for selectivity `s` is the distance threshold expected to return roughly
//! an `s`-fraction of the dataset. The calibration takes, per query, the
//! `s`-percentile of the distances from that query to the dataset (or to a
//! capped index sample of it, for scalability), and averages those
//! percentiles over the whole query sample.

use distances::Number;

use prep_utils::ParMetric;

use crate::data::ParDataset;
use crate::utils;

/// Estimates the mean percentile radius for each selectivity.
///
/// Distances are computed from each query to the items at the indices in
/// `sample`, which the caller draws once per run and shares across all
/// queries and selectivities. Each query's distance list is computed and
/// sorted once; every selectivity reads its percentile (nearest rank,
/// `floor(s * len)`) from that one sorted list, so the returned radii are
/// exactly non-decreasing in the selectivity.
///
/// Cost is O(Q · len(sample)) metric evaluations, the dominant cost of the
/// preparation pipeline.
///
/// # Errors
///
/// * If `queries` or `sample` is empty.
/// * If any selectivity lies outside `(0, 1]`.
pub fn estimate<I, T, D, M>(
    data: &D,
    metric: &M,
    queries: &[usize],
    selectivities: &[f32],
    sample: &[usize],
) -> Result<Vec<(f32, f32)>, String>
where
    I: Send + Sync,
    T: Number,
    D: ParDataset<I>,
    M: ParMetric<I, T>,
{
    if queries.is_empty() {
        return Err("Cannot calibrate radii without queries.".to_string());
    }
    if sample.is_empty() {
        return Err("Cannot calibrate radii against an empty index sample.".to_string());
    }
    if let Some(&s) = selectivities.iter().find(|&&s| s <= 0.0 || s > 1.0) {
        return Err(format!("Selectivity {s} is outside (0, 1]."));
    }

    let mut per_selectivity = vec![Vec::with_capacity(queries.len()); selectivities.len()];
    for &q in queries {
        let mut d = data
            .par_one_to_many(q, sample, metric)
            .into_iter()
            .map(|(_, d)| d)
            .collect::<Vec<_>>();
        d.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Less));

        for (radii, &s) in per_selectivity.iter_mut().zip(selectivities) {
            radii.push(d[percentile_index(s, d.len())]);
        }
    }

    Ok(selectivities
        .iter()
        .zip(per_selectivity)
        .map(|(&s, radii)| (s, utils::mean::<T, f32>(&radii)))
        .collect())
}

/// The nearest-rank index of the `s`-percentile in a sorted list of the
/// given length.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentile_index(s: f32, len: usize) -> usize {
    let rank = (s.as_f64() * len.as_f64()).floor() as usize;
    Ord::min(rank, len - 1)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use prep_utils::metrics::Euclidean;
    use rand::prelude::*;

    use crate::data::FlatVec;
    use crate::sample;

    use super::{estimate, percentile_index};

    #[test]
    fn percentile_indices() {
        assert_eq!(percentile_index(0.02, 1000), 20);
        assert_eq!(percentile_index(0.32, 1000), 320);
        assert_eq!(percentile_index(1.0, 1000), 999);
        assert_eq!(percentile_index(0.5, 1), 0);
    }

    /// A uniform random dataset of 1000 points on the unit interval.
    fn uniform_line() -> FlatVec<Vec<f32>> {
        let items = symagen::random_data::random_tabular(
            1000,
            1,
            0.0,
            1.0,
            &mut rand::rngs::StdRng::seed_from_u64(42),
        );
        FlatVec::new_array(items).unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[test]
    fn monotone_in_selectivity() -> Result<(), String> {
        let data = uniform_line();
        let queries = sample::sample_indices(1000, 100, None)?;
        let selectivities = [0.02, 0.04, 0.08, 0.16, 0.32];

        let full_sample = (0..1000).collect::<Vec<_>>();
        let table = estimate(&data, &Euclidean, &queries, &selectivities, &full_sample)?;
        assert_eq!(table.len(), selectivities.len());
        for pair in table.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }

        // Monotonicity is exact even against a capped sample.
        let capped = sample::sample_indices(1000, 200, None)?;
        let table = estimate(&data, &Euclidean, &queries, &selectivities, &capped)?;
        for pair in table.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }

        Ok(())
    }

    #[test]
    fn calibrated_radius_hits_target_fraction() -> Result<(), String> {
        use crate::data::{Dataset, ParDataset};

        let data = uniform_line();
        let queries = sample::sample_indices(1000, 100, None)?;
        let full_sample = (0..1000).collect::<Vec<_>>();

        let table = estimate(&data, &Euclidean, &queries, &[0.02], &full_sample)?;
        let radius = table[0].1;

        // A brute-force range count at the calibrated radius, over a held-out
        // query set, should select roughly 2% of the points.
        let held_out = sample::sample_indices(1000, 50, Some(7))?;
        let total_hits = held_out
            .iter()
            .map(|&q| {
                data.par_one_to_many(q, &full_sample, &Euclidean)
                    .into_iter()
                    .filter(|&(_, d)| d <= radius)
                    .count()
            })
            .sum::<usize>();
        let fraction = total_hits as f64 / (50.0 * data.cardinality() as f64);
        assert!(
            (0.005..0.05).contains(&fraction),
            "fraction {fraction} too far from 0.02"
        );

        Ok(())
    }

    #[test]
    fn rejects_bad_inputs() -> Result<(), String> {
        let data = uniform_line();
        let queries = sample::sample_indices(1000, 10, None)?;
        let full_sample = (0..1000).collect::<Vec<_>>();

        assert!(estimate(&data, &Euclidean, &[], &[0.02], &full_sample).is_err());
        assert!(estimate(&data, &Euclidean, &queries, &[0.02], &[]).is_err());
        assert!(estimate(&data, &Euclidean, &queries, &[0.0], &full_sample).is_err());
        assert!(estimate(&data, &Euclidean, &queries, &[1.5], &full_sample).is_err());

        Ok(())
    }

    #[test]
    fn identical_runs_identical_tables() -> Result<(), String> {
        let data = uniform_line();
        let queries = sample::sample_indices(1000, 20, None)?;
        let capped = sample::sample_indices(1000, 100, None)?;
        let selectivities = [0.04, 0.16];

        let a = estimate(&data, &Euclidean, &queries, &selectivities, &capped)?;
        let b = estimate(&data, &Euclidean, &queries, &selectivities, &capped)?;
        for (x, y) in a.iter().zip(&b) {
            assert!(approx_eq!(f32, x.1, y.1, ulps = 0));
        }

        Ok(())
    }
}
