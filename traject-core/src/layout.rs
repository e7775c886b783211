//! On-disk layout of one dataset instance.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Derives the directory layout for one dataset instance.
///
/// Everything hangs off a single log root: the arrays and per-episode
/// frame tree live under `<root>/<env>_data/<type>_<id>/`, while
/// pretrained actor weights are looked up under `<root>/<env>_base/models/`.
#[derive(Clone, Debug)]
pub struct DataLayout {
    env_name: String,
    log_root: PathBuf,
    data_dir: PathBuf,
}

impl DataLayout {
    /// Creates the layout for environment `env`, namespaced by the
    /// dataset category label and numeric id.
    pub fn new(log_root: impl AsRef<Path>, env: &str, data_type: &str, data_id: u32) -> Self {
        let log_root = log_root.as_ref().to_path_buf();
        let data_dir = log_root
            .join(format!("{}_data", env))
            .join(format!("{}_{}", data_type, data_id));
        Self {
            env_name: env.to_string(),
            log_root,
            data_dir,
        }
    }

    /// Directory receiving the three dataset arrays.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Root of the per-episode frame tree.
    pub fn img_dir(&self) -> PathBuf {
        self.data_dir.join("imgs")
    }

    /// Path of the pretrained actor weights selected by `policy_seed`.
    pub fn actor_weights(&self, policy_seed: u64) -> PathBuf {
        self.log_root
            .join(format!("{}_base", self.env_name))
            .join("models")
            .join(format!("TD3_{}_{}_actor", self.env_name, policy_seed))
    }

    /// Creates the dataset directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(self.img_dir())
    }
}
