//! Multilayer perceptron with ReLU activations.
use anyhow::Result;
use candle_core::Tensor;
use candle_nn::{linear, Linear, Module, VarBuilder};
use serde::{Deserialize, Serialize};

/// Configuration of [`Mlp`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct MlpConfig {
    pub(crate) in_dim: usize,
    pub(crate) units: Vec<usize>,
    pub(crate) out_dim: usize,
}

impl MlpConfig {
    /// Creates configuration of MLP.
    pub fn new(in_dim: usize, units: Vec<usize>, out_dim: usize) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
        }
    }
}

/// Returns the linear modules of the network.
///
/// Layers are registered as `l1`, `l2`, ... in `vb`'s variable tree,
/// the naming used by the pretrained actor checkpoints.
fn create_linear_layers(vb: VarBuilder, config: &MlpConfig) -> Result<Vec<Linear>> {
    let mut in_out_pairs: Vec<(usize, usize)> = (0..config.units.len().saturating_sub(1))
        .map(|i| (config.units[i], config.units[i + 1]))
        .collect();
    match config.units.first() {
        Some(&first) => {
            in_out_pairs.insert(0, (config.in_dim, first));
            in_out_pairs.push((config.units[config.units.len() - 1], config.out_dim));
        }
        None => in_out_pairs.push((config.in_dim, config.out_dim)),
    }

    let layers = in_out_pairs
        .iter()
        .enumerate()
        .map(|(i, &(in_dim, out_dim))| linear(in_dim, out_dim, vb.pp(format!("l{}", i + 1))))
        .collect::<candle_core::Result<Vec<_>>>()?;

    Ok(layers)
}

/// Multilayer perceptron with ReLU activation between layers.
pub struct Mlp {
    layers: Vec<Linear>,
}

impl Mlp {
    /// Builds the network from `vb`'s variable tree.
    pub fn build(vb: VarBuilder, config: &MlpConfig) -> Result<Self> {
        Ok(Self {
            layers: create_linear_layers(vb, config)?,
        })
    }

    /// Applies the network. ReLU follows every layer except the last,
    /// whose output is returned unbounded.
    pub fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let last = self.layers.len() - 1;
        let mut xs = xs.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i != last {
                xs = xs.relu()?;
            }
        }
        Ok(xs)
    }
}
