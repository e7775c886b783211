//! Rollout driving.
//!
//! The collector owns the interaction loop: it resets the environment,
//! repeatedly queries a policy and steps the environment, feeds the
//! results to the episode buffer and the frame writer, and folds every
//! finished episode into the transition accumulator. Everything runs
//! strictly sequentially on the calling thread.
use crate::{Dataset, EpisodeBuffer, Env, FrameWriter, Policy, TransitionSet};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Configuration of [`Collector`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Directory receiving the per-episode frame subdirectories.
    pub img_dir: PathBuf,

    /// Camera the offscreen renderer is asked for.
    pub camera: String,

    /// Rendered frame width in pixels.
    pub frame_width: u32,

    /// Rendered frame height in pixels.
    pub frame_height: u32,

    /// Optional safety cap on steps per episode.
    ///
    /// `None` keeps the documented behavior of blocking indefinitely on
    /// an environment that never signals termination.
    pub max_steps: Option<usize>,
}

impl CollectorConfig {
    /// Creates a configuration writing frames under `img_dir`.
    pub fn new(img_dir: impl Into<PathBuf>) -> Self {
        Self {
            img_dir: img_dir.into(),
            camera: "track".to_string(),
            frame_width: 256,
            frame_height: 256,
            max_steps: None,
        }
    }

    /// Sets the step-count safety cap.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the renderer camera name.
    pub fn camera(mut self, v: impl Into<String>) -> Self {
        self.camera = v.into();
        self
    }

    /// Sets the rendered frame resolution.
    pub fn frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    /// Constructs [`CollectorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`CollectorConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Per-episode result reported by the collector.
#[derive(Clone, Debug)]
pub struct EpisodeSummary {
    /// Steps taken until termination.
    pub steps: usize,

    /// Cumulative reward over the episode. Informational only; it is
    /// never persisted.
    pub reward: f32,
}

/// Drives an environment through complete episodes and accumulates
/// globally aligned transitions.
pub struct Collector<E: Env> {
    env: E,
    frames: FrameWriter,
    buffer: EpisodeBuffer<E::Obs, E::Act>,
    transitions: TransitionSet,
    episodes_done: usize,
    max_steps: Option<usize>,
}

impl<E: Env> Collector<E> {
    /// Creates a collector around `env`.
    pub fn new(env: E, config: CollectorConfig) -> Self {
        let frames = FrameWriter::new(
            config.img_dir,
            config.camera,
            config.frame_width,
            config.frame_height,
        );
        Self {
            env,
            frames,
            buffer: EpisodeBuffer::new(),
            transitions: TransitionSet::new(),
            episodes_done: 0,
            max_steps: config.max_steps,
        }
    }

    /// Rolls out `n_episodes` complete episodes with `policy`.
    ///
    /// Episodes run back to back; any failure aborts the whole run.
    pub fn collect(
        &mut self,
        policy: &mut dyn Policy<E>,
        n_episodes: usize,
    ) -> Result<Vec<EpisodeSummary>> {
        let mut summaries = Vec::with_capacity(n_episodes);
        for _ in 0..n_episodes {
            summaries.push(self.episode(policy)?);
        }
        Ok(summaries)
    }

    fn episode(&mut self, policy: &mut dyn Policy<E>) -> Result<EpisodeSummary> {
        let episode = self.episodes_done;
        let mut obs = self.env.reset()?;
        self.buffer.start();
        self.buffer.record_observation(obs.clone());
        self.frames.capture(&mut self.env, episode, 0)?;

        let mut t = 0;
        let mut reward_total = 0.0;
        loop {
            let act = policy.sample(&obs);
            let step = self.env.step(&act);
            let done = step.is_done();

            self.buffer.record_action(act);
            self.buffer.record_observation(step.obs.clone());
            t += 1;
            self.frames.capture(&mut self.env, episode, t)?;
            reward_total += step.reward;
            obs = step.obs;

            if done || self.max_steps.map_or(false, |cap| t >= cap) {
                break;
            }
        }

        let (observations, actions) = self.buffer.drain();
        self.transitions.merge(observations, actions)?;
        self.episodes_done += 1;
        info!(
            "Episode {} finished after {} timesteps   reward:{}",
            episode, t, reward_total
        );

        Ok(EpisodeSummary {
            steps: t,
            reward: reward_total,
        })
    }

    /// Number of transitions accumulated so far.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Releases the environment and stacks the accumulated transitions
    /// into a shape-checked [`Dataset`].
    ///
    /// Nothing is persisted here; a failed check therefore aborts the
    /// run before any array file exists.
    pub fn finalize(mut self) -> Result<Dataset> {
        self.env.close();
        let dataset = self.transitions.finalize()?;
        Ok(dataset)
    }
}
