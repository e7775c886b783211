//! Built-in policy variants.
use crate::{ActionSpace, Env, Policy};
use ndarray::Array1;

/// Uniform exploration over the action space.
///
/// Samples every action independently of the observation, so it needs no
/// pretrained weights and is always constructible.
pub struct UniformPolicy {
    space: ActionSpace,
    rng: fastrand::Rng,
}

impl UniformPolicy {
    /// Creates a policy sampling uniformly from `space`.
    pub fn new(space: ActionSpace, seed: u64) -> Self {
        Self {
            space,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<E> Policy<E> for UniformPolicy
where
    E: Env<Act = Array1<f32>>,
{
    fn sample(&mut self, _obs: &E::Obs) -> E::Act {
        self.space.sample(&mut self.rng)
    }
}

/// Mixes uniform exploration into another policy.
///
/// Every step draws the exploration variant with probability `p` and the
/// wrapped policy otherwise, each decision independent of the last.
pub struct MixedPolicy<E: Env> {
    uniform: UniformPolicy,
    learned: Box<dyn Policy<E>>,
    p: f64,
    rng: fastrand::Rng,
}

impl<E> MixedPolicy<E>
where
    E: Env<Act = Array1<f32>>,
{
    /// Wraps `learned`, replacing its action with an exploration sample
    /// at probability `p`.
    pub fn new(learned: Box<dyn Policy<E>>, space: ActionSpace, p: f64, seed: u64) -> Self {
        Self {
            uniform: UniformPolicy::new(space, seed),
            learned,
            p,
            // Separate stream so the mixing decisions do not consume the
            // exploration samples' randomness.
            rng: fastrand::Rng::with_seed(seed.wrapping_add(1)),
        }
    }
}

impl<E> Policy<E> for MixedPolicy<E>
where
    E: Env<Act = Array1<f32>>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        if self.rng.f64() < self.p {
            Policy::<E>::sample(&mut self.uniform, obs)
        } else {
            self.learned.sample(obs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEnv;

    struct ConstantPolicy(Array1<f32>);

    impl Policy<ScriptedEnv> for ConstantPolicy {
        fn sample(&mut self, _obs: &Array1<f32>) -> Array1<f32> {
            self.0.clone()
        }
    }

    #[test]
    fn uniform_policy_respects_bounds_without_weights() {
        let space = ActionSpace::new(2, 1.0);
        let mut policy = UniformPolicy::new(space.clone(), 0);
        let obs = Array1::from(vec![0.0, 0.0, 0.0]);
        for _ in 0..200 {
            let act = Policy::<ScriptedEnv>::sample(&mut policy, &obs);
            assert!(space.contains(&act));
        }
    }

    #[test]
    fn mixed_policy_with_p_zero_always_defers_to_learned() {
        let space = ActionSpace::new(2, 1.0);
        let learned = ConstantPolicy(Array1::from(vec![0.25, -0.25]));
        let mut policy = MixedPolicy::new(Box::new(learned), space, 0.0, 1);
        let obs = Array1::from(vec![0.0, 0.0, 0.0]);
        for _ in 0..50 {
            let act = policy.sample(&obs);
            assert_eq!(act, Array1::from(vec![0.25, -0.25]));
        }
    }

    #[test]
    fn mixed_policy_with_p_one_never_defers_to_learned() {
        let space = ActionSpace::new(2, 1.0);
        // A learned action outside the space would be caught below.
        let learned = ConstantPolicy(Array1::from(vec![5.0, 5.0]));
        let mut policy = MixedPolicy::new(Box::new(learned), space.clone(), 1.0, 1);
        let obs = Array1::from(vec![0.0, 0.0, 0.0]);
        for _ in 0..50 {
            let act = policy.sample(&obs);
            assert!(space.contains(&act));
        }
    }
}
