//! Deterministic actor loading pretrained weights.
use crate::mlp::{Mlp, MlpConfig};
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use log::info;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;
use traject_core::{Env, Policy};

/// Configuration of [`Actor`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ActorConfig {
    state_dim: usize,
    action_dim: usize,
    max_action: f32,
    units: Vec<usize>,
}

impl ActorConfig {
    /// Creates a configuration for the given environment dimensions,
    /// with the default two hidden layers of width 256.
    pub fn new(state_dim: usize, action_dim: usize, max_action: f32) -> Self {
        Self {
            state_dim,
            action_dim,
            max_action,
            units: vec![256, 256],
        }
    }

    /// Overrides the hidden layer widths.
    pub fn units(mut self, units: Vec<usize>) -> Self {
        self.units = units;
        self
    }
}

/// Deterministic feed-forward actor.
///
/// Maps a state vector through hidden ReLU layers to an unbounded output,
/// then applies `tanh` scaled by the environment's maximum action
/// magnitude. Weights are read once at construction; a missing or
/// incompatible checkpoint fails there, never during rollout.
pub struct Actor {
    net: Mlp,
    max_action: f32,
    device: Device,
}

impl Actor {
    /// Builds an actor with freshly initialized weights.
    pub fn build(config: &ActorConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        Self::with_var_builder(vb, config, device)
    }

    /// Loads an actor from a pretrained PyTorch checkpoint.
    pub fn load(path: impl AsRef<Path>, config: &ActorConfig, device: Device) -> Result<Self> {
        let path = path.as_ref();
        let vb = VarBuilder::from_pth(path, DType::F32, &device)
            .with_context(|| format!("cannot load actor weights from {:?}", path))?;
        let actor = Self::with_var_builder(vb, config, device)?;
        info!("Loaded actor weights from {:?}", path);
        Ok(actor)
    }

    fn with_var_builder(vb: VarBuilder, config: &ActorConfig, device: Device) -> Result<Self> {
        let net = Mlp::build(
            vb,
            &MlpConfig::new(config.state_dim, config.units.clone(), config.action_dim),
        )?;
        Ok(Self {
            net,
            max_action: config.max_action,
            device,
        })
    }

    /// Computes the bounded action for a single state vector.
    pub fn select_action(&self, state: &[f32]) -> Result<Vec<f32>> {
        let xs = Tensor::from_slice(state, (1, state.len()), &self.device)?;
        let action = self.net.forward(&xs)?.tanh()?;
        let action = (action * self.max_action as f64)?;
        Ok(action.flatten_all()?.to_vec1::<f32>()?)
    }
}

impl<E> Policy<E> for Actor
where
    E: Env<Obs = Array1<f32>, Act = Array1<f32>>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let action = self
            .select_action(&obs.to_vec())
            .expect("actor forward pass failed");
        Array1::from(action)
    }
}
