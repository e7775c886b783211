use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`PendulumEnv`](super::PendulumEnv).
pub struct PendulumConfig {
    /// Steps after which an episode is truncated.
    ///
    /// The pendulum has no terminal state; truncation is what ends an
    /// episode.
    pub max_episode_steps: usize,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            max_episode_steps: 200,
        }
    }
}

impl PendulumConfig {
    /// Sets the truncation horizon.
    pub fn max_episode_steps(mut self, v: usize) -> Self {
        self.max_episode_steps = v;
        self
    }
}
