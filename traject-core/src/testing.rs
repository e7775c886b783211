//! Deterministic environment used by tests.
use crate::{ActionSpace, Env, Frame, Step};
use anyhow::Result;
use ndarray::Array1;
use std::cell::Cell;
use std::rc::Rc;

/// Environment emitting a scripted sequence of episodes.
///
/// Episode `i` terminates after `lengths[i]` steps. Every observation is
/// generated from a global counter so tests can predict the exact value
/// at any position of the merged dataset via [`ScriptedEnv::expected_obs`].
pub(crate) struct ScriptedEnv {
    lengths: Vec<usize>,
    episode: usize,
    step_in_episode: usize,
    next_obs_index: usize,
    closed: Rc<Cell<bool>>,
}

pub(crate) const OBS_DIM: usize = 3;
pub(crate) const ACT_DIM: usize = 2;
pub(crate) const MAX_ACTION: f32 = 1.0;

impl ScriptedEnv {
    pub(crate) fn new(lengths: Vec<usize>) -> Self {
        Self {
            lengths,
            episode: 0,
            step_in_episode: 0,
            next_obs_index: 0,
            closed: Rc::new(Cell::new(false)),
        }
    }

    /// Shared flag set by [`Env::close`], observable after the
    /// environment has been consumed.
    pub(crate) fn closed_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.closed)
    }

    /// The observation produced `index`-th over the whole run.
    pub(crate) fn expected_obs(index: usize) -> Vec<f32> {
        (0..OBS_DIM)
            .map(|i| index as f32 + i as f32 * 0.1)
            .collect()
    }

    fn next_obs(&mut self) -> Array1<f32> {
        let obs = Array1::from(Self::expected_obs(self.next_obs_index));
        self.next_obs_index += 1;
        obs
    }
}

impl Env for ScriptedEnv {
    type Config = ();
    type Obs = Array1<f32>;
    type Act = Array1<f32>;
    type Info = ();

    fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self::new(vec![1]))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.step_in_episode = 0;
        Ok(self.next_obs())
    }

    fn step(&mut self, _act: &Self::Act) -> Step<Self> {
        self.step_in_episode += 1;
        let length = self.lengths.get(self.episode).copied().unwrap_or(usize::MAX);
        let done = self.step_in_episode >= length;
        if done {
            self.episode += 1;
        }
        Step::new(self.next_obs(), 1.0, done, false, ())
    }

    fn observation_dim(&self) -> usize {
        OBS_DIM
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(ACT_DIM, MAX_ACTION)
    }

    fn render(&mut self, _camera: &str, width: u32, height: u32) -> Result<Frame> {
        Ok(Frame {
            width,
            height,
            data: vec![128; (width * height * 3) as usize],
        })
    }

    fn close(&mut self) {
        self.closed.set(true);
    }
}
