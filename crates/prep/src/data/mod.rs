//! The dataset abstraction consumed by the experiment-preparation engine.

use distances::Number;
use rayon::prelude::*;

use prep_utils::{Metric, ParMetric};

pub mod readers;

/// An ordered, 0-indexed, immutable collection of items.
///
/// All distance computations go through a [`Metric`] passed to the methods
/// here; a dataset never owns its metric. The engine assumes datasets are
/// non-empty and finite.
pub trait Dataset<I> {
    /// The name of the dataset.
    fn name(&self) -> &str;

    /// Returns a reference to an indexed item from the dataset.
    ///
    /// The implementor may choose to panic if the index is out of bounds.
    fn get(&self, index: usize) -> &I;

    /// Returns the number of items in the dataset.
    fn cardinality(&self) -> usize;

    /// Returns the distance from a query item to the given indexed item.
    fn query_to_one<T: Number, M: Metric<I, T>>(&self, query: &I, b: usize, metric: &M) -> T {
        metric.distance(query, self.get(b))
    }

    /// Returns the distances from a query item to all indexed items in the
    /// given slice.
    fn query_to_many<S: AsRef<[usize]>, T: Number, M: Metric<I, T>>(
        &self,
        query: &I,
        b: S,
        metric: &M,
    ) -> Vec<(usize, T)> {
        b.as_ref()
            .iter()
            .map(|&j| (j, metric.distance(query, self.get(j))))
            .collect()
    }

    /// Computes the distance between two indexed items in the dataset.
    fn one_to_one<T: Number, M: Metric<I, T>>(&self, a: usize, b: usize, metric: &M) -> T {
        self.query_to_one(self.get(a), b, metric)
    }

    /// Computes the distances from one indexed item to all indexed items in
    /// the given slice.
    fn one_to_many<S: AsRef<[usize]>, T: Number, M: Metric<I, T>>(&self, a: usize, b: S, metric: &M) -> Vec<(usize, T)> {
        self.query_to_many(self.get(a), b, metric)
    }
}

/// An extension of the [`Dataset`] trait for parallel distance computations.
///
/// We provide a blanket implementation for any `Send + Sync` dataset of
/// `Send + Sync` items.
pub trait ParDataset<I: Send + Sync>: Dataset<I> + Send + Sync {
    /// Parallel version of [`Dataset::query_to_many`].
    fn par_query_to_many<S, T, M>(&self, query: &I, b: S, metric: &M) -> Vec<(usize, T)>
    where
        S: AsRef<[usize]>,
        T: Number,
        M: ParMetric<I, T>,
    {
        b.as_ref()
            .par_iter()
            .map(|&j| (j, metric.distance(query, self.get(j))))
            .collect()
    }

    /// Parallel version of [`Dataset::one_to_many`].
    fn par_one_to_many<S, T, M>(&self, a: usize, b: S, metric: &M) -> Vec<(usize, T)>
    where
        S: AsRef<[usize]>,
        T: Number,
        M: ParMetric<I, T>,
    {
        self.par_query_to_many(self.get(a), b, metric)
    }
}

impl<I: Send + Sync, D: Dataset<I> + Send + Sync> ParDataset<I> for D {}

/// A dataset stored as a flat vector of items.
pub struct FlatVec<I> {
    /// The items in the dataset.
    items: Vec<I>,
    /// A hint for the dimensionality of the dataset.
    dimensionality_hint: (usize, Option<usize>),
    /// The name of the dataset.
    name: String,
}

impl<I> FlatVec<I> {
    /// Creates a new `FlatVec`.
    ///
    /// # Errors
    ///
    /// * If the items are empty.
    pub fn new(items: Vec<I>) -> Result<Self, String> {
        if items.is_empty() {
            Err("The items are empty.".to_string())
        } else {
            Ok(Self {
                items,
                dimensionality_hint: (0, None),
                name: "Unknown FlatVec".to_string(),
            })
        }
    }

    /// Changes the name of the dataset.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets a lower bound for the dimensionality of the dataset.
    #[must_use]
    pub const fn with_dim_lower_bound(mut self, lower_bound: usize) -> Self {
        self.dimensionality_hint.0 = lower_bound;
        self
    }

    /// Sets an upper bound for the dimensionality of the dataset.
    #[must_use]
    pub const fn with_dim_upper_bound(mut self, upper_bound: usize) -> Self {
        self.dimensionality_hint.1 = Some(upper_bound);
        self
    }

    /// A hint for the dimensionality of the dataset.
    #[must_use]
    pub const fn dimensionality_hint(&self) -> (usize, Option<usize>) {
        self.dimensionality_hint
    }

    /// The items in the dataset.
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }
}

impl<T> FlatVec<Vec<T>> {
    /// Creates a new `FlatVec` from tabular data.
    ///
    /// The items are assumed to be rows of one fixed dimensionality, which is
    /// read off the first row.
    ///
    /// # Errors
    ///
    /// * If the items are empty.
    pub fn new_array(items: Vec<Vec<T>>) -> Result<Self, String> {
        let dimensionality = items.first().map_or(0, Vec::len);
        Self::new(items).map(|data| {
            data.with_dim_lower_bound(dimensionality)
                .with_dim_upper_bound(dimensionality)
        })
    }
}

impl<I> Dataset<I> for FlatVec<I> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, index: usize) -> &I {
        &self.items[index]
    }

    fn cardinality(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use prep_utils::metrics::Manhattan;

    use super::{Dataset, FlatVec, ParDataset};

    #[test]
    fn creation() -> Result<(), String> {
        let items = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];

        let data = FlatVec::new(items.clone())?;
        assert_eq!(data.cardinality(), 3);
        assert_eq!(data.dimensionality_hint(), (0, None));

        let data = FlatVec::new_array(items)?.with_name("tiny");
        assert_eq!(data.name(), "tiny");
        assert_eq!(data.cardinality(), 3);
        assert_eq!(data.dimensionality_hint(), (2, Some(2)));

        assert!(FlatVec::<Vec<f32>>::new(Vec::new()).is_err());

        Ok(())
    }

    #[test]
    fn distances() -> Result<(), String> {
        let items = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let data = FlatVec::new_array(items)?;

        assert!((data.one_to_one(0, 1, &Manhattan) - 4.0).abs() < f32::EPSILON);
        assert!((data.one_to_one(2, 0, &Manhattan) - 8.0).abs() < f32::EPSILON);

        let d = data.one_to_many(0, &[0, 1, 2], &Manhattan);
        assert_eq!(d.iter().map(|&(j, _)| j).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!((d[2].1 - 8.0).abs() < f32::EPSILON);

        let par_d = data.par_one_to_many(0, &[0, 1, 2], &Manhattan);
        assert_eq!(d, par_d);

        let q = vec![0.0_f32, 0.0];
        let d = data.query_to_many(&q, &[0, 1, 2], &Manhattan);
        assert!((d[0].1 - 3.0).abs() < f32::EPSILON);
        assert!((d[2].1 - 11.0).abs() < f32::EPSILON);

        Ok(())
    }
}
