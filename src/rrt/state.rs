use crate::error::{Result, RrtError};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A point in N-dimensional configuration space.
///
/// The dimensionality is fixed at construction. Configurations are immutable
/// values; two configurations are equal iff every coordinate matches exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration<F: Float> {
    values: Vec<F>,
}

impl<F: Float> Configuration<F> {
    /// Constructs a configuration from its coordinates.
    pub fn new(values: Vec<F>) -> Self {
        Self { values }
    }

    /// Returns the coordinates.
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// Returns the number of coordinates.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Euclidean norm of the coordinate vector.
    pub fn length(&self) -> F {
        self.values
            .iter()
            .fold(F::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    /// Returns true iff every coordinate matches exactly.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.values == other.values
    }

    /// Fails with `DimensionMismatch` unless `other` has the same dimensionality.
    pub fn check_dimension(&self, other: &Self) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(RrtError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    /// Squared Euclidean distance to another configuration.
    pub fn distance_squared(&self, other: &Self) -> Result<F> {
        self.check_dimension(other)?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .fold(F::zero(), |acc, (&a, &b)| {
                let delta = a - b;
                acc + delta * delta
            }))
    }

    /// Euclidean distance to another configuration.
    pub fn distance(&self, other: &Self) -> Result<F> {
        Ok(self.distance_squared(other)?.sqrt())
    }
}

impl<F: Float> From<Vec<F>> for Configuration<F> {
    fn from(values: Vec<F>) -> Self {
        Self::new(values)
    }
}

impl<F: Float, const N: usize> From<[F; N]> for Configuration<F> {
    fn from(values: [F; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<F: Float> Index<usize> for Configuration<F> {
    type Output = F;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
