//! The `Levenshtein` edit distance metric.

use super::{Metric, ParMetric};

/// The `Levenshtein` edit distance metric.
pub struct Levenshtein;

impl<I: AsRef<str>> Metric<I, u32> for Levenshtein {
    fn distance(&self, a: &I, b: &I) -> u32 {
        distances::strings::levenshtein(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "levenshtein"
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
        // Quadratic in the lengths of the two strings.
        true
    }
}

impl<I: AsRef<str> + Send + Sync> ParMetric<I, u32> for Levenshtein {}
