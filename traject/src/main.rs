//! One-shot batch command collecting a paired transition dataset.
//!
//! Rolls out a policy in a simulated environment for a fixed number of
//! episodes, storing aligned `(state, next_state, action)` arrays and
//! one rendered frame per timestep under the log root.
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use traject_candle_policy::{Actor, ActorConfig, Device};
use traject_core::{
    Collector, CollectorConfig, DataLayout, Env, MixedPolicy, Policy, UniformPolicy,
};
use traject_pendulum_env::{PendulumConfig, PendulumEnv};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Environment identifier
    #[arg(long, default_value = "Pendulum-v1")]
    env: String,

    /// Root directory for datasets and pretrained weights
    #[arg(long, default_value = "./logs")]
    log_root: String,

    /// Dataset category label
    #[arg(long, default_value = "base")]
    data_type: String,

    /// Dataset numeric id
    #[arg(long, default_value_t = 0)]
    data_id: u32,

    /// Number of episodes to roll out
    #[arg(long, default_value_t = 400)]
    episode_n: usize,

    /// Probability of taking a random action instead of the policy action
    #[arg(long, default_value_t = 1.0)]
    random: f64,

    /// Random seed for the environment and exploration sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Seed selecting the pretrained actor weights
    #[arg(long, default_value_t = 0)]
    policy_seed: u64,

    /// Optional safety cap on steps per episode
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print the composed configuration as YAML and exit
    #[arg(long, default_value_t = false)]
    show_config: bool,
}

fn build_env(args: &Args) -> Result<PendulumEnv> {
    match args.env.as_str() {
        "Pendulum-v1" => PendulumEnv::build(&PendulumConfig::default(), args.seed as i64),
        name => bail!("unknown environment: {}", name),
    }
}

/// Selects the policy variant from the random-action probability.
///
/// With `--random 1.0` no weight file is touched; otherwise the actor is
/// loaded eagerly so a missing checkpoint aborts before any episode runs.
fn build_policy(
    args: &Args,
    env: &PendulumEnv,
    layout: &DataLayout,
) -> Result<Box<dyn Policy<PendulumEnv>>> {
    let space = env.action_space();
    if args.random >= 1.0 {
        return Ok(Box::new(UniformPolicy::new(space, args.seed)));
    }

    let config = ActorConfig::new(env.observation_dim(), space.dim, space.high);
    let actor = Actor::load(layout.actor_weights(args.policy_seed), &config, Device::Cpu)?;
    if args.random <= 0.0 {
        Ok(Box::new(actor))
    } else {
        Ok(Box::new(MixedPolicy::new(
            Box::new(actor),
            space,
            args.random,
            args.seed,
        )))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(0.0..=1.0).contains(&args.random) {
        bail!("--random must lie in [0, 1], got {}", args.random);
    }

    let layout = DataLayout::new(&args.log_root, &args.env, &args.data_type, args.data_id);
    let config = CollectorConfig::new(layout.img_dir()).max_steps(args.max_steps);

    if args.show_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let env = build_env(&args)?;
    let mut policy = build_policy(&args, &env, &layout)?;
    layout
        .ensure_dirs()
        .with_context(|| format!("cannot create {:?}", layout.data_dir()))?;

    info!(
        "Collecting {} episodes of {} into {:?}",
        args.episode_n,
        args.env,
        layout.data_dir()
    );

    let mut collector = Collector::new(env, config);
    let summaries = collector.collect(policy.as_mut(), args.episode_n)?;
    let dataset = collector.finalize()?;
    dataset.save(layout.data_dir())?;

    let steps: usize = summaries.iter().map(|s| s.steps).sum();
    info!(
        "Collected {} transitions over {} episodes ({} steps)",
        dataset.len(),
        args.episode_n,
        steps
    );

    Ok(())
}
