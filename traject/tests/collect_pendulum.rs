//! End-to-end rollout over the pendulum environment.
use tempdir::TempDir;
use traject_core::{Collector, CollectorConfig, Env, UniformPolicy};
use traject_pendulum_env::{PendulumConfig, PendulumEnv};

#[test]
fn pure_exploration_run_produces_an_aligned_dataset() {
    let dir = TempDir::new("traject").unwrap();
    let env_config = PendulumConfig::default().max_episode_steps(4);
    let env = PendulumEnv::build(&env_config, 1).unwrap();
    let mut policy = UniformPolicy::new(env.action_space(), 1);
    let config = CollectorConfig::new(dir.path().join("imgs")).frame_size(32, 32);
    let mut collector = Collector::new(env, config);

    let summaries = collector.collect(&mut policy, 3).unwrap();
    assert_eq!(summaries.iter().map(|s| s.steps).sum::<usize>(), 12);

    let dataset = collector.finalize().unwrap();
    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.now_state().ncols(), 3);
    assert_eq!(dataset.next_state().ncols(), 3);
    assert_eq!(dataset.action().ncols(), 1);

    dataset.save(dir.path()).unwrap();
    for name in ["now_state.npy", "next_state.npy", "action.npy"] {
        assert!(dir.path().join(name).is_file(), "missing {}", name);
    }
    // One frame per observation, reset frame included.
    assert!(dir.path().join("imgs/episode-0/img_0_0.jpg").is_file());
    assert!(dir.path().join("imgs/episode-2/img_2_4.jpg").is_file());
}
