//! Environment.
use super::{Act, ActionSpace, Info, Obs, Step};
use crate::frame::Frame;
use anyhow::Result;

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configuration.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, act: &Self::Act) -> Step<Self>
    where
        Self: Sized;

    /// Dimensionality of observations.
    fn observation_dim(&self) -> usize;

    /// The action space declared by the environment.
    fn action_space(&self) -> ActionSpace;

    /// Renders the current visual state offscreen from a named camera
    /// at the given resolution.
    fn render(&mut self, camera: &str, width: u32, height: u32) -> Result<Frame>;

    /// Releases resources held by the environment.
    fn close(&mut self);
}
