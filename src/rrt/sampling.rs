use crate::error::{Result, RrtError};
use crate::rrt::state::Configuration;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A distribution from which configurations are drawn.
pub trait SamplingDistribution<F: Float> {
    /// Draws a configuration.
    fn sample(&mut self) -> Configuration<F>;

    /// The dimensionality of the drawn configurations.
    fn dimension(&self) -> usize;
}

/// Checks that every bound pair is finite with `min <= max` and that the step is positive.
pub(crate) fn validate_limits<F: Float>(limits: &[(F, F)], step_size: F) -> Result<()> {
    grid_steps(limits, step_size).map(|_| ())
}

/// Returns the largest grid index `floor((max - min) / step_size)` of every dimension.
///
/// Fails with `InvalidBounds` when a bound is not finite, `min > max`, or the grid
/// index does not fit in a `usize`.
fn grid_steps<F: Float>(limits: &[(F, F)], step_size: F) -> Result<Vec<usize>> {
    if !step_size.is_finite() || step_size <= F::zero() {
        return Err(RrtError::InvalidStepSize);
    }
    limits
        .iter()
        .enumerate()
        .map(|(dimension, &(min, max))| {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(RrtError::InvalidBounds { dimension });
            }
            // The span itself overflows for bounds near F::max_value().
            ((max - min) / step_size)
                .floor()
                .to_usize()
                .ok_or(RrtError::InvalidBounds { dimension })
        })
        .collect()
}

/// Uniform sampling on a grid inside an axis-aligned box.
///
/// Each coordinate is `min + k * step_size` where `k` is drawn uniformly from
/// `0..=floor((max - min) / step_size)`. Restricting samples to the grid bounds
/// the number of distinct samples.
pub struct UniformGridDistribution<F: Float, R: Rng = StdRng> {
    limits: Vec<(F, F)>,
    step_size: F,
    // Largest grid index per dimension.
    max_steps: Vec<usize>,
    rng: R,
}

impl<F: Float> UniformGridDistribution<F, StdRng> {
    /// Constructs a new distribution with a generator seeded from OS entropy.
    ///
    /// Parameters:
    /// - `limits`: The `(min, max)` bounds, one pair per dimension.
    /// - `step_size`: The grid spacing shared by all dimensions.
    pub fn new(limits: Vec<(F, F)>, step_size: F) -> Result<Self> {
        Self::with_rng(limits, step_size, StdRng::from_entropy())
    }
}

impl<F: Float, R: Rng> UniformGridDistribution<F, R> {
    /// Constructs a new distribution drawing from the given generator.
    ///
    /// Each distribution owns its generator, so independent planners never share sampling state.
    pub fn with_rng(limits: Vec<(F, F)>, step_size: F, rng: R) -> Result<Self> {
        let max_steps = grid_steps(&limits, step_size)?;
        Ok(Self {
            limits,
            step_size,
            max_steps,
            rng,
        })
    }

    pub fn limits(&self) -> &[(F, F)] {
        &self.limits
    }

    pub fn step_size(&self) -> F {
        self.step_size
    }
}

impl<F: Float, R: Rng> SamplingDistribution<F> for UniformGridDistribution<F, R> {
    fn sample(&mut self) -> Configuration<F> {
        let values = self
            .limits
            .iter()
            .zip(self.max_steps.iter())
            .map(|(&(min, max), &max_step)| {
                let k = self.rng.gen_range(0..=max_step);
                // F::from on usize cannot fail for Float types.
                let offset = F::from(k).unwrap_or_else(F::zero) * self.step_size;
                // Rounding may push the top grid point a hair past max.
                (min + offset).min(max)
            })
            .collect();
        Configuration::new(values)
    }

    fn dimension(&self) -> usize {
        self.limits.len()
    }
}
