//! The `Chebyshev` (L-infinity) distance metric.

use super::{Metric, ParMetric};

/// The `Chebyshev` (L-infinity) distance metric.
pub struct Chebyshev;

impl<I: AsRef<[f32]>> Metric<I, f32> for Chebyshev {
    fn distance(&self, a: &I, b: &I) -> f32 {
        distances::vectors::chebyshev(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "chebyshev"
    }

    fn has_identity(&self) -> bool {
        true
    }

    fn has_non_negativity(&self) -> bool {
        true
    }

    fn has_symmetry(&self) -> bool {
        true
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }

    fn is_expensive(&self) -> bool {
        false
    }
}

impl<I: AsRef<[f32]> + Send + Sync> ParMetric<I, f32> for Chebyshev {}
