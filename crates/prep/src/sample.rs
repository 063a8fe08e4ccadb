//! Reproducible uniform sampling of object indices.

use rand::prelude::*;

/// The default seed for the random number generator, for experiment
/// repeatability when no seed is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Draws `count` distinct indices uniformly, without replacement, from
/// `[0, cardinality)`.
///
/// Every call with the same arguments returns the same indices: the sampler
/// builds its own `StdRng` from the given seed, so draws at different sites
/// do not perturb one another.
///
/// # Errors
///
/// * If `count` exceeds `cardinality`.
pub fn sample_indices(cardinality: usize, count: usize, seed: Option<u64>) -> Result<Vec<usize>, String> {
    if count > cardinality {
        return Err(format!(
            "Cannot sample {count} indices from a dataset with cardinality {cardinality}."
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED));
    Ok(rand::seq::index::sample(&mut rng, cardinality, count).into_vec())
}
