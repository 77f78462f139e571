//! Append-only decision logs (`keep.csv`, `remove.csv`)
//!
//! Each file is a `profileUrl` header followed by one URL per line. Lines are only
//! ever appended; the logs are history, never deduplicated or rewritten.

use std::path::{Path, PathBuf};
use tidyli_core::Decision;
use tokio::io::AsyncWriteExt;

pub const LOG_HEADER: &str = "profileUrl";

/// Which log a decision is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Keep,
    Remove,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Keep => "keep",
            LogKind::Remove => "remove",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "keep" => Some(LogKind::Keep),
            "remove" => Some(LogKind::Remove),
            _ => None,
        }
    }
}

impl TryFrom<Decision> for LogKind {
    type Error = Decision;

    fn try_from(decision: Decision) -> Result<Self, Self::Error> {
        match decision {
            Decision::Keep => Ok(LogKind::Keep),
            Decision::Remove => Ok(LogKind::Remove),
            Decision::Pending => Err(decision),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header in {path}: expected \"profileUrl\", found \"{found}\"")]
    InvalidHeader { path: PathBuf, found: String },
}

impl LogError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> LogError + '_ {
        move |source| LogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The pair of decision logs under one directory
#[derive(Debug, Clone)]
pub struct DecisionLog {
    dir: PathBuf,
}

impl DecisionLog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: LogKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Create the directory and the log file (with its header) if either is missing
    pub async fn ensure_file(&self, kind: LogKind) -> Result<PathBuf, LogError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(LogError::io(&self.dir))?;

        let path = self.path(kind);
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(LogError::io(&path))?;
        if !exists {
            tokio::fs::write(&path, format!("{}\n", LOG_HEADER))
                .await
                .map_err(LogError::io(&path))?;
            tracing::info!("Created decision log {}", path.display());
        }
        Ok(path)
    }

    /// Ensure both logs exist
    pub async fn ensure_all(&self) -> Result<(), LogError> {
        tokio::try_join!(
            self.ensure_file(LogKind::Keep),
            self.ensure_file(LogKind::Remove)
        )?;
        Ok(())
    }

    /// Every URL recorded in the `kind` log, in append order
    pub async fn read_urls(&self, kind: LogKind) -> Result<Vec<String>, LogError> {
        let path = self.ensure_file(kind).await?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(LogError::io(&path))?;

        parse_log(&content).map_err(|found| LogError::InvalidHeader { path, found })
    }

    /// Append one sanitized URL line to the `kind` log
    pub async fn append(&self, kind: LogKind, url: &str) -> Result<(), LogError> {
        let path = self.ensure_file(kind).await?;
        let line = format!("{}\n", sanitize_url(url));

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(LogError::io(&path))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(LogError::io(&path))?;
        file.flush().await.map_err(LogError::io(&path))?;
        Ok(())
    }
}

/// Parse a log body; on a header mismatch returns the header that was found
pub fn parse_log(content: &str) -> Result<Vec<String>, String> {
    let mut lines = content.trim().lines();
    let header = lines.next().unwrap_or("").trim();
    if header != LOG_HEADER {
        return Err(header.to_string());
    }

    Ok(lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Strip line breaks so a URL can never inject extra rows
pub fn sanitize_url(url: &str) -> String {
    url.replace(['\n', '\r'], "").trim().to_string()
}
