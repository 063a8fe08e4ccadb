//! Farthest-first pivot selection.
//!
//! Downstream metric-index structures prune their search space with a small
//! set of reference objects. The greedy heuristic here picks, at each step,
//! the object maximizing the cumulative distance to all previously selected
//! pivots.

use distances::Number;

use prep_utils::ParMetric;

use crate::data::ParDataset;
use crate::utils;

/// Selects `num_pivots` pivot indices with the farthest-first heuristic.
///
/// The first pivot is always index 0, by convention. Each following pivot is
/// the index maximizing the running sum of distances to the already selected
/// pivots, restricted to indices not yet selected, with ties broken in favor
/// of the lowest index. The restriction guarantees exactly `num_pivots`
/// distinct indices for every metric, including degenerate ones under which
/// an unrestricted argmax could repeat itself.
///
/// Each iteration computes one distance vector from the most recently added
/// pivot to the whole dataset, in parallel, for a total cost of O(N·P)
/// metric evaluations and O(N) auxiliary memory.
///
/// # Errors
///
/// * If `num_pivots` is zero or exceeds the cardinality of the dataset.
pub fn farthest_first<I, T, D, M>(data: &D, metric: &M, num_pivots: usize) -> Result<Vec<usize>, String>
where
    I: Send + Sync,
    T: Number,
    D: ParDataset<I>,
    M: ParMetric<I, T>,
{
    let cardinality = data.cardinality();
    if num_pivots == 0 {
        return Err("Cannot select zero pivots.".to_string());
    }
    if num_pivots > cardinality {
        return Err(format!(
            "Cannot select {num_pivots} pivots from a dataset with cardinality {cardinality}."
        ));
    }

    let mut pivots = Vec::with_capacity(num_pivots);
    pivots.push(0);

    let indices = (0..cardinality).collect::<Vec<_>>();
    let mut candidate = vec![true; cardinality];
    candidate[0] = false;

    // score[i] is the sum of distances from i to every selected pivot.
    let mut score = vec![T::zero(); cardinality];

    while pivots.len() < num_pivots {
        let last = pivots[pivots.len() - 1];
        for (i, d) in data.par_one_to_many(last, &indices, metric) {
            score[i] += d;
        }

        let (next, _) = utils::arg_max_masked(&score, &candidate)
            .ok_or_else(|| "No candidate indices remain for pivot selection.".to_string())?;
        candidate[next] = false;
        pivots.push(next);
    }

    Ok(pivots)
}

#[cfg(test)]
mod tests {
    use prep_utils::metrics::{Levenshtein, Manhattan};
    use rand::prelude::*;
    use test_case::test_case;

    use crate::data::FlatVec;

    use super::farthest_first;

    /// The 1-d line `[0, 1, 2, 3, 10]`.
    fn line() -> FlatVec<Vec<f32>> {
        let items = [0.0_f32, 1.0, 2.0, 3.0, 10.0].iter().map(|&x| vec![x]).collect();
        FlatVec::new_array(items).unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[test]
    fn line_scenario() -> Result<(), String> {
        let data = line();

        // Pivot 0 is fixed; index 4 is clearly farthest from it; the
        // cumulative scores then tie and the lowest untaken index wins.
        assert_eq!(farthest_first(&data, &Manhattan, 1)?, vec![0]);
        assert_eq!(farthest_first(&data, &Manhattan, 2)?, vec![0, 4]);
        assert_eq!(farthest_first(&data, &Manhattan, 3)?, vec![0, 4, 1]);

        Ok(())
    }

    #[test]
    fn rejects_bad_pivot_counts() {
        let data = line();
        assert!(farthest_first(&data, &Manhattan, 0).is_err());
        assert!(farthest_first(&data, &Manhattan, 6).is_err());
    }

    #[test_case(1)]
    #[test_case(5)]
    #[test_case(20)]
    fn distinct_and_in_range(num_pivots: usize) {
        let items = symagen::random_data::random_tabular(
            50,
            4,
            0.0,
            1.0,
            &mut rand::rngs::StdRng::seed_from_u64(42),
        );
        let data = FlatVec::new_array(items).unwrap_or_else(|e| unreachable!("{e}"));

        let pivots = farthest_first(&data, &Manhattan, num_pivots).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(pivots.len(), num_pivots);
        assert_eq!(pivots[0], 0);
        assert!(pivots.iter().all(|&i| i < 50));

        let mut sorted = pivots.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), num_pivots);
    }

    #[test]
    fn degenerate_metric_still_distinct() -> Result<(), String> {
        // All-equal objects make every distance zero, so only the candidate
        // restriction keeps the pivots distinct.
        let data = FlatVec::new(vec!["same".to_string(); 8])?;
        let pivots = farthest_first(&data, &Levenshtein, 8)?;
        assert_eq!(pivots, (0..8).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn string_pivots() -> Result<(), String> {
        let items = symagen::random_data::random_string(30, 4, 10, "acgt", 7);
        let data = FlatVec::new(items)?;

        let pivots = farthest_first(&data, &Levenshtein, 5)?;
        assert_eq!(pivots.len(), 5);
        assert_eq!(pivots[0], 0);

        // Same inputs, same pivots.
        assert_eq!(pivots, farthest_first(&data, &Levenshtein, 5)?);

        Ok(())
    }
}
