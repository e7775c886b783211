//! A torque-controlled pendulum environment.
//!
//! The environment implements [`traject_core::Env`] natively: classic
//! swing-up dynamics with a single continuous torque action, plus a
//! software offscreen renderer so frame capture works without a display.
mod config;
mod env;
mod render;

pub use config::PendulumConfig;
pub use env::PendulumEnv;
