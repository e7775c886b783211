//! Learned policy for traject implemented with
//! [candle](https://crates.io/crates/candle-core).
//!
//! The crate provides a deterministic feed-forward actor that loads a
//! fixed set of pretrained weights once at construction and maps state
//! vectors to magnitude-bounded action vectors.
mod actor;
mod mlp;

pub use actor::{Actor, ActorConfig};
pub use candle_core::Device;
pub use mlp::{Mlp, MlpConfig};
