use crate::config::PendulumConfig;
use crate::render;
use anyhow::Result;
use ndarray::Array1;
use std::f32::consts::PI;
use traject_core::{ActionSpace, Env, Frame, Step};

const GRAVITY: f32 = 10.0;
const MASS: f32 = 1.0;
const LENGTH: f32 = 1.0;
const MAX_SPEED: f32 = 8.0;
const MAX_TORQUE: f32 = 2.0;
const DT: f32 = 0.05;

/// Swing-up pendulum with continuous torque control.
///
/// Observations are `[cos theta, sin theta, theta_dot]`; the action is a
/// single torque component in `[-2, 2]`. Reward is the negative of the
/// squared deviation from the upright position plus small velocity and
/// torque penalties. Episodes never terminate naturally and are
/// truncated after the configured number of steps.
pub struct PendulumEnv {
    theta: f32,
    theta_dot: f32,
    steps: usize,
    config: PendulumConfig,
    rng: fastrand::Rng,
}

impl PendulumEnv {
    fn obs(&self) -> Array1<f32> {
        Array1::from(vec![self.theta.cos(), self.theta.sin(), self.theta_dot])
    }

    #[inline]
    fn angle_normalize(x: f32) -> f32 {
        ((x + PI).rem_euclid(2.0 * PI)) - PI
    }
}

impl Env for PendulumEnv {
    type Config = PendulumConfig;
    type Obs = Array1<f32>;
    type Act = Array1<f32>;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            theta: 0.0,
            theta_dot: 0.0,
            steps: 0,
            config: config.clone(),
            rng: fastrand::Rng::with_seed(seed as u64),
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.theta = PI * (2.0 * self.rng.f32() - 1.0);
        self.theta_dot = 2.0 * self.rng.f32() - 1.0;
        self.steps = 0;
        Ok(self.obs())
    }

    fn step(&mut self, act: &Self::Act) -> Step<Self> {
        let torque = act[0].clamp(-MAX_TORQUE, MAX_TORQUE);

        // theta_ddot = (3g/(2l)) sin(theta) + (3/(m l^2)) u
        let theta_ddot = (3.0 * GRAVITY / (2.0 * LENGTH)) * self.theta.sin()
            + (3.0 / (MASS * LENGTH * LENGTH)) * torque;
        self.theta_dot = (self.theta_dot + theta_ddot * DT).clamp(-MAX_SPEED, MAX_SPEED);
        self.theta = Self::angle_normalize(self.theta + self.theta_dot * DT);
        self.steps += 1;

        let theta_norm = Self::angle_normalize(self.theta);
        let cost = theta_norm * theta_norm
            + 0.1 * self.theta_dot * self.theta_dot
            + 0.001 * torque * torque;
        let is_truncated = self.steps >= self.config.max_episode_steps;

        Step::new(self.obs(), -cost, false, is_truncated, ())
    }

    fn observation_dim(&self) -> usize {
        3
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(1, MAX_TORQUE)
    }

    fn render(&mut self, _camera: &str, width: u32, height: u32) -> Result<Frame> {
        Ok(render::draw(self.theta, self.theta_dot, width, height))
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(seed: i64) -> PendulumEnv {
        PendulumEnv::build(&PendulumConfig::default(), seed).unwrap()
    }

    #[test]
    fn reset_is_deterministic_per_seed() {
        let mut a = build(7);
        let mut b = build(7);
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());

        let mut c = build(8);
        assert_ne!(a.reset().unwrap(), c.reset().unwrap());
    }

    #[test]
    fn observations_lie_on_the_unit_circle() {
        let mut env = build(0);
        let obs = env.reset().unwrap();
        let norm = obs[0] * obs[0] + obs[1] * obs[1];
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn episode_is_truncated_at_the_configured_horizon() {
        let config = PendulumConfig::default().max_episode_steps(5);
        let mut env = PendulumEnv::build(&config, 0).unwrap();
        env.reset().unwrap();

        let act = Array1::from(vec![0.0]);
        for t in 1..=5 {
            let step = env.step(&act);
            assert_eq!(step.is_done(), t == 5);
            assert!(!step.is_terminated);
        }
    }

    #[test]
    fn horizon_restarts_after_reset() {
        let config = PendulumConfig::default().max_episode_steps(2);
        let mut env = PendulumEnv::build(&config, 0).unwrap();
        env.reset().unwrap();
        let act = Array1::from(vec![0.5]);
        env.step(&act);
        env.step(&act);

        env.reset().unwrap();
        assert!(!env.step(&act).is_done());
    }

    #[test]
    fn declared_spaces_match_the_dynamics() {
        let env = build(0);
        assert_eq!(env.observation_dim(), 3);
        assert_eq!(env.action_space(), ActionSpace::new(1, 2.0));
    }

    #[test]
    fn render_produces_a_full_rgb_buffer() {
        let mut env = build(0);
        env.reset().unwrap();
        let frame = env.render("track", 64, 48).unwrap();
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 48);
        assert_eq!(frame.data.len(), 64 * 48 * 3);
    }
}
