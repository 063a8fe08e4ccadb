//! The `Manhattan` (L1) distance metric.

use super::{Metric, ParMetric};

/// The `Manhattan` (L1) distance metric.
pub struct Manhattan;

impl<I: AsRef<[f32]>> Metric<I, f32> for Manhattan {
    fn distance(&self, a: &I, b: &I) -> f32 {
        distances::vectors::manhattan(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "manhattan"
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

impl<I: AsRef<[f32]> + Send + Sync> ParMetric<I, f32> for Manhattan {}
