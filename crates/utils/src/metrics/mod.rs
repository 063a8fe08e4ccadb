//! The `Metric` trait and the distance functions used by the experiments.

use distances::Number;

mod chebyshev;
mod euclidean;
mod levenshtein;
mod manhattan;

pub use chebyshev::Chebyshev;
pub use euclidean::Euclidean;
pub use levenshtein::Levenshtein;
pub use manhattan::Manhattan;

/// The `Metric` trait is used for all distance computations in this workspace.
///
/// # Type Parameters
///
/// - `I`: The type of the items.
/// - `T`: The type of the distance values.
///
/// Implementations must be pure: non-negative and symmetric for all pairs of
/// items, with `d(a, a) == 0`. The identity property is assumed by callers
/// and is not verified at runtime.
pub trait Metric<I, T: Number> {
    /// Call the metric on two items.
    fn distance(&self, a: &I, b: &I) -> T;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric provides an identity among the items.
    ///
    /// Identity is defined as `d(a, b) = 0` if and only if `a = b`.
    fn has_identity(&self) -> bool;

    /// Whether the metric only produces non-negative values.
    ///
    /// Non-negativity is defined as `d(a, b) >= 0` for all items `a` and `b`.
    fn has_non_negativity(&self) -> bool;

    /// Whether the metric is symmetric.
    ///
    /// Symmetry is defined as `d(a, b) = d(b, a)` for all items `a` and `b`.
    fn has_symmetry(&self) -> bool;

    /// Whether the metric satisfies the triangle inequality.
    ///
    /// The triangle inequality is defined as `d(a, b) + d(b, c) >= d(a, c)`
    /// for all items `a`, `b`, and `c`. Downstream index structures rely on
    /// this to prune with the pivots chosen here.
    fn obeys_triangle_inequality(&self) -> bool;

    /// Whether the metric is expensive to compute.
    ///
    /// We say that a metric is expensive if it costs more than linear time in
    /// the size of the items to compute the distance between two items.
    fn is_expensive(&self) -> bool;
}

/// Parallel version of [`Metric`].
#[allow(clippy::module_name_repetitions)]
pub trait ParMetric<I: Send + Sync, T: Number>: Metric<I, T> + Send + Sync {
    /// Parallel version of [`Metric::distance`].
    ///
    /// The default implementation calls the non-parallel version of the
    /// distance function.
    fn par_distance(&self, a: &I, b: &I) -> T {
        self.distance(a, b)
    }
}

impl<I, T: Number> Metric<I, T> for Box<dyn ParMetric<I, T>>
where
    I: Send + Sync,
{
    fn distance(&self, a: &I, b: &I) -> T {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_identity(&self) -> bool {
        (**self).has_identity()
    }

    fn has_non_negativity(&self) -> bool {
        (**self).has_non_negativity()
    }

    fn has_symmetry(&self) -> bool {
        (**self).has_symmetry()
    }

    fn obeys_triangle_inequality(&self) -> bool {
        (**self).obeys_triangle_inequality()
    }

    fn is_expensive(&self) -> bool {
        (**self).is_expensive()
    }
}

impl<I: Send + Sync, T: Number> ParMetric<I, T> for Box<dyn ParMetric<I, T>> {
    fn par_distance(&self, a: &I, b: &I) -> T {
        (**self).par_distance(a, b)
    }
}
