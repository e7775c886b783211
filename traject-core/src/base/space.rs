//! Action space.
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// A symmetric box-bounded continuous action space.
///
/// Every component lies in `[-high, high]`, where `high` is the maximum
/// action magnitude declared by the environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// Number of action components.
    pub dim: usize,

    /// Maximum magnitude of any component.
    pub high: f32,
}

impl ActionSpace {
    /// Creates an action space of `dim` components bounded by `high`.
    pub fn new(dim: usize, high: f32) -> Self {
        Self { dim, high }
    }

    /// Draws an action uniformly from the space.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Array1<f32> {
        Array1::from_iter((0..self.dim).map(|_| self.high * (2.0 * rng.f32() - 1.0)))
    }

    /// Whether every component of `act` lies within bounds.
    pub fn contains(&self, act: &Array1<f32>) -> bool {
        act.len() == self.dim && act.iter().all(|a| a.abs() <= self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_actions_stay_in_bounds() {
        let space = ActionSpace::new(4, 2.5);
        let mut rng = fastrand::Rng::with_seed(0);
        for _ in 0..100 {
            let act = space.sample(&mut rng);
            assert_eq!(act.len(), 4);
            assert!(space.contains(&act));
        }
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let space = ActionSpace::new(3, 1.0);
        let mut rng_a = fastrand::Rng::with_seed(42);
        let mut rng_b = fastrand::Rng::with_seed(42);
        assert_eq!(space.sample(&mut rng_a), space.sample(&mut rng_b));
    }

    #[test]
    fn contains_rejects_wrong_dim_and_magnitude() {
        let space = ActionSpace::new(2, 1.0);
        assert!(!space.contains(&Array1::from(vec![0.0])));
        assert!(!space.contains(&Array1::from(vec![0.0, 1.5])));
        assert!(space.contains(&Array1::from(vec![-1.0, 1.0])));
    }
}
