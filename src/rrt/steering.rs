use crate::error::{Result, RrtError};
use crate::rrt::state::Configuration;
use num_traits::Float;

/// Steers from one configuration towards another by at most `step_size`.
///
/// Each coordinate of the result is `from[i] + min(1, step_size / d) * (toward[i] - from[i])`
/// where `d` is the distance between the two configurations, so the result never
/// overshoots `toward` and equals it when `toward` is within `step_size`.
///
/// Fails with `DegenerateStep` when `from` and `toward` coincide, with
/// `StalledStep` when `step_size` is below the float spacing at `from` so the
/// result would not move, and with `DimensionMismatch` when their dimensionalities differ.
pub fn step<F: Float>(
    from: &Configuration<F>,
    toward: &Configuration<F>,
    step_size: F,
) -> Result<Configuration<F>> {
    let distance = from.distance(toward)?;
    if distance == F::zero() {
        return Err(RrtError::DegenerateStep);
    }
    if distance <= step_size {
        return Ok(toward.clone());
    }

    let scale = step_size / distance;
    let values = from
        .values()
        .iter()
        .zip(toward.values().iter())
        .map(|(&a, &b)| a + scale * (b - a))
        .collect();
    let next = Configuration::new(values);
    if next.is_equal(from) {
        return Err(RrtError::StalledStep);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_step_advances_by_step_size() {
        let from = Configuration::from([0.0, 0.0]);
        let toward = Configuration::from([3.0, 4.0]);
        let next = step(&from, &toward, 1.0).unwrap();
        assert_abs_diff_eq!(next[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(next[1], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(from.distance(&next).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_step_lands_on_close_target() {
        let from = Configuration::from([1.0, 1.0]);
        let toward = Configuration::from([1.2, 1.0]);
        let next = step(&from, &toward, 0.5).unwrap();
        assert!(next.is_equal(&toward));
    }

    #[test]
    fn test_repeated_steps_converge_without_overshoot() {
        let target = Configuration::from([1.0, -2.0, 0.5]);
        let start = Configuration::from([-3.0, 2.0, 0.0]);
        let total = start.distance(&target).unwrap();
        let mut current = start.clone();
        let mut remaining = total;
        let mut hops = 0;
        while !current.is_equal(&target) {
            current = step(&current, &target, 0.25).unwrap();
            let next_remaining = current.distance(&target).unwrap();
            assert!(next_remaining < remaining);
            assert!(start.distance(&current).unwrap() <= total + 1e-12);
            remaining = next_remaining;
            hops += 1;
            assert!(hops < 100);
        }
        assert_eq!(remaining, 0.0);
    }

    #[test]
    fn test_step_between_coincident_configurations_fails() {
        let a = Configuration::from([0.5, 0.5]);
        assert_eq!(step(&a, &a.clone(), 0.1), Err(RrtError::DegenerateStep));
    }

    #[test]
    fn test_step_below_float_spacing_fails() {
        // Neighboring f64 values near 1e16 are 2.0 apart.
        let from = Configuration::from([1e16]);
        let toward = Configuration::from([1e17]);
        assert_eq!(step(&from, &toward, 0.5), Err(RrtError::StalledStep));
        assert!(step(&from, &toward, 4.0).is_ok());
    }

    #[test]
    fn test_step_dimension_mismatch() {
        let a = Configuration::from([0.5, 0.5]);
        let b = Configuration::from([0.5]);
        assert!(matches!(
            step(&a, &b, 0.1),
            Err(RrtError::DimensionMismatch { .. })
        ));
    }
}
