//! Utility functions for the crate.

use core::cmp::Ordering;

use distances::{number::Float, Number};

/// Return the index and value of the maximum value in the given slice of
/// values, considering only indices for which `mask` is `true`.
///
/// Ties are broken in favor of the lowest index, so the result is
/// deterministic for any input. NAN values are ordered as smaller than all
/// other values.
///
/// This will return `None` if the slice is empty or the mask admits no index.
pub fn arg_max_masked<T: PartialOrd + Copy>(values: &[T], mask: &[bool]) -> Option<(usize, T)> {
    values
        .iter()
        .zip(mask)
        .enumerate()
        .filter_map(|(i, (&v, &keep))| keep.then_some((i, v)))
        .reduce(|best, next| {
            if matches!(next.1.partial_cmp(&best.1), Some(Ordering::Greater)) {
                next
            } else {
                best
            }
        })
}

/// Return the mean value of the given slice of values.
pub fn mean<T: Number, F: Float>(values: &[T]) -> F {
    F::from(values.iter().copied().sum::<T>()) / F::from(values.len())
}
