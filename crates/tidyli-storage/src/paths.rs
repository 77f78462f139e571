//! Path resolution for TidyLi state files

use std::path::{Path, PathBuf};

/// Resolves standard paths for review state
#[derive(Debug, Clone)]
pub struct Paths {
    pub state_dir: PathBuf,
}

impl Paths {
    /// Create a resolver rooted at `~/.tidyli`
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".tidyli")))
    }

    /// Create a resolver rooted at an explicit state directory
    pub fn with_root(state_dir: impl AsRef<Path>) -> Self {
        Self {
            state_dir: state_dir.as_ref().to_path_buf(),
        }
    }

    /// Durable decision collection (one JSON array, rewritten on every change)
    pub fn decisions_file(&self) -> PathBuf {
        self.state_dir.join("profile_decisions.json")
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.state_dir.join("config.json")
    }
}
