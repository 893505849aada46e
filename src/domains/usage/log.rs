//! Usage Event Log - bounded, append-only record of invocations.
//!
//! The log is a FIFO of at most `capacity` events; appending past capacity
//! evicts the oldest entries. The in-memory list sits behind a `RwLock` so an
//! append is applied atomically with respect to readers, and a separate
//! persistence mutex makes store writes happen in mutation order without
//! holding readers up while the store is busy.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::error::UsageError;
use super::event::UsageEvent;
use super::store::{MemoryStore, UsageStore};

/// Default number of retained events.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Bounded FIFO of usage events with write-through persistence.
pub struct UsageLog {
    events: RwLock<VecDeque<UsageEvent>>,
    persist: Mutex<()>,
    capacity: usize,
    store: Arc<dyn UsageStore>,
}

impl UsageLog {
    /// Create an empty, memory-only log.
    pub fn in_memory(capacity: usize) -> Self {
        Self::with_events(capacity, Arc::new(MemoryStore), VecDeque::new())
    }

    /// Open a log backed by `store`, loading whatever it already holds.
    ///
    /// Unreadable store contents are logged and the log starts empty.
    pub async fn open(capacity: usize, store: Arc<dyn UsageStore>) -> Self {
        let mut events: VecDeque<UsageEvent> = match store.load().await {
            Ok(events) => events.into(),
            Err(e) => {
                warn!("Failed to load usage events from {}: {}", store.describe(), e);
                VecDeque::new()
            }
        };

        let capacity = capacity.max(1);
        if events.len() > capacity {
            let excess = events.len() - capacity;
            events.drain(..excess);
        }

        info!(
            "Usage log opened on {} with {} events (capacity {})",
            store.describe(),
            events.len(),
            capacity
        );

        Self::with_events(capacity, store, events)
    }

    fn with_events(capacity: usize, store: Arc<dyn UsageStore>, events: VecDeque<UsageEvent>) -> Self {
        Self {
            events: RwLock::new(events),
            persist: Mutex::new(()),
            capacity: capacity.max(1),
            store,
        }
    }

    /// Maximum number of retained events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an event, evicting the oldest ones beyond capacity.
    ///
    /// Store failures are logged; the in-memory append always succeeds.
    /// The event list is only copied out when the store persists it.
    pub async fn append(&self, event: UsageEvent) {
        let persists = self.store.persists();
        let _persist = if persists {
            Some(self.persist.lock().await)
        } else {
            None
        };

        let snapshot = {
            let mut events = self.events.write().await;
            events.push_back(event);
            if events.len() > self.capacity {
                let excess = events.len() - self.capacity;
                events.drain(..excess);
            }
            persists.then(|| Vec::from_iter(events.iter().cloned()))
        };

        if let Some(snapshot) = snapshot {
            if let Err(e) = self.store.save(&snapshot).await {
                warn!("Failed to persist usage events to {}: {}", self.store.describe(), e);
            }
        }
    }

    /// Current contents in insertion order.
    pub async fn all(&self) -> Vec<UsageEvent> {
        self.events.read().await.iter().cloned().collect()
    }

    /// Number of retained events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Remove every event from the log and its store.
    pub async fn clear(&self) -> Result<(), UsageError> {
        let _persist = self.persist.lock().await;
        let removed = {
            let mut events = self.events.write().await;
            let n = events.len();
            events.clear();
            n
        };
        info!("Usage log cleared ({} events removed)", removed);
        self.store.clear().await
    }

    /// Serialize the current contents as a pretty-printed JSON array.
    pub async fn export_snapshot(&self) -> Result<String, UsageError> {
        let events = self.all().await;
        Ok(serde_json::to_string_pretty(&events)?)
    }

    /// Write the snapshot to `target`.
    ///
    /// When `target` is an existing directory the file is named
    /// `toolkit-stats-YYYY-MM-DD.json` inside it. Returns the written path.
    pub async fn export_to(&self, target: &Path) -> Result<PathBuf, UsageError> {
        let path = if tokio::fs::metadata(target)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            target.join(export_file_name())
        } else {
            target.to_path_buf()
        };

        let data = self.export_snapshot().await?;
        tokio::fs::write(&path, data).await?;
        info!("Exported usage snapshot to {:?}", path);
        Ok(path)
    }
}

/// Default export file name for today's date.
pub fn export_file_name() -> String {
    format!("toolkit-stats-{}.json", Utc::now().format("%Y-%m-%d"))
}
