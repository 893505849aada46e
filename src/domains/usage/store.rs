//! Storage media for the usage log.
//!
//! The log keeps its working set in memory and writes every mutation through
//! to a [`UsageStore`]. Which medium backs it is decided by configuration.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::error::UsageError;
use super::event::UsageEvent;

/// Persistence medium for usage events.
///
/// A store only needs whole-snapshot semantics: the log hands it the full,
/// already-bounded event list after every mutation.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Load previously persisted events, oldest first.
    async fn load(&self) -> Result<Vec<UsageEvent>, UsageError>;

    /// Replace the persisted contents with `events`.
    async fn save(&self, events: &[UsageEvent]) -> Result<(), UsageError>;

    /// Remove everything persisted.
    async fn clear(&self) -> Result<(), UsageError>;

    /// Whether `save` keeps anything. The log skips snapshots for stores that don't.
    fn persists(&self) -> bool {
        true
    }

    /// Short description for logs.
    fn describe(&self) -> String;
}

// ============================================================================
// Memory store
// ============================================================================

/// Store that persists nothing; events live only as long as the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStore;

#[async_trait]
impl UsageStore for MemoryStore {
    async fn load(&self) -> Result<Vec<UsageEvent>, UsageError> {
        Ok(Vec::new())
    }

    async fn save(&self, _events: &[UsageEvent]) -> Result<(), UsageError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), UsageError> {
        Ok(())
    }

    fn persists(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Store that keeps the events as a JSON array in a single file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash never leaves a half-written array behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "usage".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl UsageStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<UsageEvent>, UsageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let events: Vec<UsageEvent> = serde_json::from_slice(&bytes)?;
        debug!("Loaded {} usage events from {:?}", events.len(), self.path);
        Ok(events)
    }

    async fn save(&self, events: &[UsageEvent]) -> Result<(), UsageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec(events)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, data).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), UsageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
