//! Usage domain module.
//!
//! Records one [`UsageEvent`] per processed invocation and derives
//! statistics from the accumulated events.
//!
//! ## Architecture
//!
//! - `event.rs` - The immutable event record
//! - `log.rs` - Bounded FIFO event log with write-through persistence
//! - `store.rs` - Storage media behind the log (memory, JSON file)
//! - `aggregator.rs` - Windowed counts, rankings and histograms
//! - `error.rs` - Usage-specific error types

mod aggregator;
mod error;
mod event;
mod log;
mod store;

pub use aggregator::{
    ActivityEntry, CatalogOverview, CategoryCount, DAILY_BUCKETS, DailyBucket, HOURLY_BUCKETS,
    HourlyBucket, PopularTool, StatsQuery, StatsSnapshot, StatsZone, ToolUsageSummary,
    UsageAggregator, now_ms,
};
pub use error::UsageError;
pub use event::UsageEvent;
pub use log::{DEFAULT_CAPACITY, UsageLog, export_file_name};
pub use store::{JsonFileStore, MemoryStore, UsageStore};
