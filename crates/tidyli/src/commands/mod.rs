pub mod decide;
pub mod export;
pub mod list;
pub mod review;
pub mod serve;
pub mod stats;
pub mod version;

use crate::remote::Mirror;
use std::path::{Path, PathBuf};
use tidyli_core::{Config, Profile};
use tidyli_review::{DecisionStore, JsonFileStorage};
use tidyli_storage::Paths;

/// Resolved paths and configuration shared by every command
pub struct Context {
    pub paths: Paths,
    pub config: Config,
}

impl Context {
    /// Load config from the state directory, then apply flag overrides
    pub fn resolve(state_dir: Option<&Path>, data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let paths = match state_dir {
            Some(dir) => Paths::with_root(dir),
            None => Paths::new()?,
        };
        let mut config = Config::load(&paths.config_file())?;
        if let Some(dir) = data_dir {
            config.data_dir = dir.to_path_buf();
        }
        tracing::debug!(
            "State in {}, data in {}",
            paths.state_dir.display(),
            config.data_dir.display()
        );

        Ok(Self { paths, config })
    }

    /// Profiles from the data directory; a load failure is logged and yields none
    pub fn load_profiles(&self) -> Vec<Profile> {
        match tidyli_core::load_from_dir(&self.config.data_dir) {
            Ok(loaded) => loaded.profiles,
            Err(e) => {
                tracing::error!("Error loading profiles: {}", e);
                Vec::new()
            }
        }
    }

    pub fn open_store(&self) -> anyhow::Result<DecisionStore> {
        let storage = JsonFileStorage::new(self.paths.decisions_file());
        Ok(DecisionStore::open(Box::new(storage))?)
    }

    /// Client for the configured server, if any
    pub fn mirror(&self) -> Option<Mirror> {
        let url = self.config.server_url.as_deref()?;
        match Mirror::new(url) {
            Ok(mirror) => Some(mirror),
            Err(e) => {
                tracing::warn!("Decision mirroring disabled: {}", e);
                None
            }
        }
    }

    pub fn export_dir(&self, out: Option<&Path>) -> PathBuf {
        out.map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.export_dir.clone())
    }
}

/// Decision timestamp: milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
