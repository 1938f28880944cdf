use crate::error::{Result, RrtError};
use crate::rrt::sampling::validate_limits;
use json::JsonValue;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Step length used when none is configured.
pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Parameters of one planning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig<F: Float> {
    /// The `(min, max)` bounds, one pair per dimension.
    pub limits: Vec<(F, F)>,
    /// Sampling grid spacing and the length of one extension hop.
    pub step_size: F,
    /// Number of growth iterations performed by `RRT::run`.
    pub iterations: usize,
}

impl<F: Float> PlannerConfig<F> {
    pub fn new(limits: Vec<(F, F)>, iterations: usize) -> Self {
        Self {
            limits,
            step_size: default_step_size(),
            iterations,
        }
    }

    pub fn with_step_size(mut self, step_size: F) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn dimension(&self) -> usize {
        self.limits.len()
    }

    /// Checks that every bound pair satisfies `min <= max` and that the step size is positive.
    pub fn validate(&self) -> Result<()> {
        validate_limits(&self.limits, self.step_size)
    }

    /// Parses a configuration from a JSON document such as
    /// `{"limits": [[-10, 10], [-25, 25]], "step_size": 0.5, "iterations": 100}`.
    ///
    /// `step_size` is optional. The parsed configuration is validated.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let document = json::parse(source).map_err(|e| RrtError::InvalidConfig(e.to_string()))?;

        let limits_json = &document["limits"];
        if !limits_json.is_array() {
            return Err(RrtError::InvalidConfig("`limits` must be an array".into()));
        }
        let mut limits = Vec::with_capacity(limits_json.len());
        for (dimension, pair) in limits_json.members().enumerate() {
            match (pair.len(), number(&pair[0]), number(&pair[1])) {
                (2, Some(min), Some(max)) => limits.push((min, max)),
                _ => {
                    return Err(RrtError::InvalidConfig(format!(
                        "limit {dimension} must be a [min, max] pair of numbers"
                    )))
                }
            }
        }

        let step_size = if document["step_size"].is_null() {
            default_step_size()
        } else {
            number(&document["step_size"])
                .ok_or_else(|| RrtError::InvalidConfig("`step_size` must be a number".into()))?
        };

        let iterations = document["iterations"].as_usize().ok_or_else(|| {
            RrtError::InvalidConfig("`iterations` must be a non-negative integer".into())
        })?;

        let config = Self {
            limits,
            step_size,
            iterations,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> JsonValue {
        let mut limits = JsonValue::new_array();
        for &(min, max) in &self.limits {
            let _ = limits.push(json::array![to_f64(min), to_f64(max)]);
        }
        json::object! {
            limits: limits,
            step_size: to_f64(self.step_size),
            iterations: self.iterations,
        }
    }
}

fn default_step_size<F: Float>() -> F {
    F::from(DEFAULT_STEP_SIZE).unwrap_or_else(F::epsilon)
}

fn number<F: Float>(value: &JsonValue) -> Option<F> {
    value.as_f64().and_then(F::from)
}

fn to_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
