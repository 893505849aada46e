//! Usage Aggregator - statistics derived from the event log.
//!
//! Everything here is a pure function of an event slice and a query instant:
//! nothing is cached between calls, and missing data degrades to zeros.
//!
//! ## Windows
//!
//! - *today*: from local midnight of the query instant
//! - *this week* / *this month*: rolling 7×24h / 30×24h ending at the query instant
//! - *hourly*: 24 buckets by local hour over the rolling last 24h
//! - *daily*: 30 buckets keyed by the local dates of `now - i×24h`, `i` in `0..30`
//!
//! "Local" means the aggregator's [`StatsZone`]: either a fixed UTC offset or
//! the host zone, whose daylight-saving offset is resolved per timestamp.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::event::UsageEvent;
use crate::domains::tools::{Category, ToolRegistry};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Number of hourly buckets.
pub const HOURLY_BUCKETS: usize = 24;

/// Number of daily buckets.
pub const DAILY_BUCKETS: usize = 30;

// ============================================================================
// Query and result types
// ============================================================================

/// Size hints for a statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsQuery {
    /// Number of entries in the popularity ranking.
    pub popular_limit: usize,
    /// Number of entries in the recent-activity list.
    pub recent_limit: usize,
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            popular_limit: 10,
            recent_limit: 10,
        }
    }
}

/// Read-only statistics view computed from the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_uses: usize,
    pub today_uses: usize,
    pub this_week_uses: usize,
    pub this_month_uses: usize,
    /// Mean processing time in ms, two decimals.
    pub average_time: f64,
    /// Percentage of successful invocations, two decimals.
    pub success_rate: f64,
    pub popular_tools: Vec<PopularTool>,
    pub recent_activity: Vec<ActivityEntry>,
    pub hourly_usage: Vec<HourlyBucket>,
    pub daily_usage: Vec<DailyBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularTool {
    pub id: String,
    pub name: String,
    pub uses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub tool_id: String,
    pub tool_name: String,
    pub timestamp: i64,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub uses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub uses: usize,
}

/// Usage of a single tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsageSummary {
    pub tool_id: String,
    pub total_uses: usize,
    pub recent_uses: usize,
    pub period_days: u32,
    pub successes: usize,
    pub failures: usize,
    pub average_time: f64,
}

/// Catalog size together with headline usage numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOverview {
    pub total_tools: usize,
    pub categories: Vec<CategoryCount>,
    pub total_usage: usize,
    pub today_usage: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub tools: usize,
}

// ============================================================================
// Aggregator
// ============================================================================

/// Zone used for "today" and the histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsZone {
    /// The host zone, with its offset looked up for each instant.
    Local,
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl StatsZone {
    fn to_local(self, ms: i64) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Local => Local
                .timestamp_millis_opt(ms)
                .single()
                .map(|t| t.fixed_offset()),
            Self::Fixed(offset) => offset.timestamp_millis_opt(ms).single(),
        }
    }

    /// First instant of `date`. A day whose midnight falls in a DST gap
    /// starts at the first wall-clock hour that exists.
    fn start_of(self, date: NaiveDate) -> Option<i64> {
        (0..3).find_map(|hour| {
            let wall = date.and_hms_opt(hour, 0, 0)?;
            match self {
                Self::Local => wall
                    .and_local_timezone(Local)
                    .earliest()
                    .map(|t| t.timestamp_millis()),
                Self::Fixed(offset) => wall
                    .and_local_timezone(offset)
                    .earliest()
                    .map(|t| t.timestamp_millis()),
            }
        })
    }
}

/// Stateless statistics calculator bound to a time zone.
#[derive(Debug, Clone, Copy)]
pub struct UsageAggregator {
    zone: StatsZone,
}

impl UsageAggregator {
    pub fn new(zone: StatsZone) -> Self {
        Self { zone }
    }

    /// Aggregator following the host zone, daylight saving included.
    pub fn local() -> Self {
        Self::new(StatsZone::Local)
    }

    /// Aggregator using an offset in minutes east of UTC, falling back to UTC
    /// when the value is out of range.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(Self::utc_offset);
        Self::new(StatsZone::Fixed(offset))
    }

    pub fn zone(&self) -> StatsZone {
        self.zone
    }

    fn utc_offset() -> FixedOffset {
        chrono::Utc.fix()
    }

    /// Compute the full snapshot at `now_ms`.
    ///
    /// `display_name` maps a tool id to the name shown in rankings.
    pub fn snapshot(
        &self,
        events: &[UsageEvent],
        query: &StatsQuery,
        now_ms: i64,
        display_name: impl Fn(&str) -> String,
    ) -> StatsSnapshot {
        let total_uses = events.len();
        let today_uses = count_between(events, self.start_of_day_ms(now_ms), now_ms);
        let this_week_uses = count_between(events, now_ms - 7 * DAY_MS, now_ms);
        let this_month_uses = count_between(events, now_ms - 30 * DAY_MS, now_ms);

        let successes = events.iter().filter(|e| e.success).count();
        let success_rate = if total_uses > 0 {
            round2(successes as f64 / total_uses as f64 * 100.0)
        } else {
            0.0
        };

        let popular_tools = rank_tools(events, query.popular_limit)
            .into_iter()
            .map(|(id, uses)| PopularTool {
                name: display_name(id),
                id: id.to_string(),
                uses,
            })
            .collect();

        let recent_activity = events
            .iter()
            .rev()
            .take(query.recent_limit)
            .map(|e| ActivityEntry {
                tool_id: e.tool_id.clone(),
                tool_name: display_name(&e.tool_id),
                timestamp: e.timestamp_ms,
                success: e.success,
            })
            .collect();

        StatsSnapshot {
            total_uses,
            today_uses,
            this_week_uses,
            this_month_uses,
            average_time: mean_time(events.iter()),
            success_rate,
            popular_tools,
            recent_activity,
            hourly_usage: self.hourly_usage(events, now_ms),
            daily_usage: self.daily_usage(events, now_ms),
        }
    }

    /// Number of events since local midnight of `now_ms`.
    pub fn today_count(&self, events: &[UsageEvent], now_ms: i64) -> usize {
        count_between(events, self.start_of_day_ms(now_ms), now_ms)
    }

    /// Usage summary for one tool over the last `days` rolling days.
    pub fn tool_summary(
        &self,
        events: &[UsageEvent],
        tool_id: &str,
        days: u32,
        now_ms: i64,
    ) -> ToolUsageSummary {
        let mine: Vec<&UsageEvent> = events.iter().filter(|e| e.tool_id == tool_id).collect();
        let window_start = now_ms - i64::from(days) * DAY_MS;
        let successes = mine.iter().filter(|e| e.success).count();

        ToolUsageSummary {
            tool_id: tool_id.to_string(),
            total_uses: mine.len(),
            recent_uses: mine
                .iter()
                .filter(|e| (window_start..=now_ms).contains(&e.timestamp_ms))
                .count(),
            period_days: days,
            successes,
            failures: mine.len() - successes,
            average_time: mean_time(mine.iter().copied()),
        }
    }

    /// Catalog size and headline usage.
    pub fn overview(
        &self,
        events: &[UsageEvent],
        registry: &ToolRegistry,
        now_ms: i64,
    ) -> CatalogOverview {
        CatalogOverview {
            total_tools: registry.len(),
            categories: registry
                .category_counts()
                .into_iter()
                .map(|(category, tools)| CategoryCount { category, tools })
                .collect(),
            total_usage: events.len(),
            today_usage: self.today_count(events, now_ms),
        }
    }

    /// 24 buckets by local hour, counting the rolling last 24 hours.
    pub fn hourly_usage(&self, events: &[UsageEvent], now_ms: i64) -> Vec<HourlyBucket> {
        let mut counts = [0usize; HOURLY_BUCKETS];
        let start = now_ms - DAY_MS;

        for event in events {
            if !(start..=now_ms).contains(&event.timestamp_ms) {
                continue;
            }
            if let Some(t) = self.local_time(event.timestamp_ms) {
                counts[t.hour() as usize] += 1;
            }
        }

        counts
            .iter()
            .enumerate()
            .map(|(hour, &uses)| HourlyBucket {
                hour: hour as u32,
                uses,
            })
            .collect()
    }

    /// 30 buckets keyed by local date, ascending, over the rolling last 30 days.
    ///
    /// Events inside the 30×24h window whose date falls before the oldest
    /// bucket key are not counted.
    pub fn daily_usage(&self, events: &[UsageEvent], now_ms: i64) -> Vec<DailyBucket> {
        let dates: Vec<NaiveDate> = (0..DAILY_BUCKETS as i64)
            .rev()
            .filter_map(|i| self.local_date(now_ms - i * DAY_MS))
            .collect();

        let mut counts = vec![0usize; dates.len()];
        let start = now_ms - DAILY_BUCKETS as i64 * DAY_MS;

        if let Some(&first) = dates.first() {
            for event in events {
                if !(start..=now_ms).contains(&event.timestamp_ms) {
                    continue;
                }
                let Some(date) = self.local_date(event.timestamp_ms) else {
                    continue;
                };
                let slot = (date - first).num_days();
                if (0..counts.len() as i64).contains(&slot) {
                    counts[slot as usize] += 1;
                }
            }
        }

        dates
            .into_iter()
            .zip(counts)
            .map(|(date, uses)| DailyBucket {
                date: date.format("%Y-%m-%d").to_string(),
                uses,
            })
            .collect()
    }

    fn local_time(&self, ms: i64) -> Option<DateTime<FixedOffset>> {
        self.zone.to_local(ms)
    }

    fn local_date(&self, ms: i64) -> Option<NaiveDate> {
        self.local_time(ms).map(|t| t.date_naive())
    }

    fn start_of_day_ms(&self, now_ms: i64) -> i64 {
        self.local_date(now_ms)
            .and_then(|date| self.zone.start_of(date))
            .unwrap_or(now_ms)
    }
}

impl Default for UsageAggregator {
    fn default() -> Self {
        Self::local()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn count_between(events: &[UsageEvent], start_ms: i64, end_ms: i64) -> usize {
    events
        .iter()
        .filter(|e| (start_ms..=end_ms).contains(&e.timestamp_ms))
        .count()
}

/// Count events per tool and rank them by count, descending.
///
/// Ties keep the order in which tools first appear in the log.
fn rank_tools(events: &[UsageEvent], limit: usize) -> Vec<(&str, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<(&str, usize)> = Vec::new();

    for event in events {
        let id = event.tool_id.as_str();
        match slots.get(id) {
            Some(&slot) => ranked[slot].1 += 1,
            None => {
                slots.insert(id, ranked.len());
                ranked.push((id, 1));
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-appearance order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

fn mean_time<'a>(events: impl Iterator<Item = &'a UsageEvent>) -> f64 {
    let (sum, n) = events.fold((0u128, 0usize), |(sum, n), e| {
        (sum + u128::from(e.processing_time_ms), n + 1)
    });
    if n == 0 {
        0.0
    } else {
        round2(sum as f64 / n as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Milliseconds since the epoch for the current instant.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::sync::Mutex;

    fn utc() -> UsageAggregator {
        UsageAggregator::with_offset_minutes(0)
    }

    fn ts(s: &str) -> i64 {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn ev(at: i64, tool: &str, success: bool, ms: u64) -> UsageEvent {
        UsageEvent::at(at, tool, success, ms)
    }

    fn names(id: &str) -> String {
        id.to_uppercase()
    }

    #[test]
    fn test_empty_log_snapshot() {
        let snap = utc().snapshot(&[], &StatsQuery::default(), ts("2024-05-10 12:00:00"), names);

        assert_eq!(snap.total_uses, 0);
        assert_eq!(snap.today_uses, 0);
        assert_eq!(snap.this_week_uses, 0);
        assert_eq!(snap.this_month_uses, 0);
        assert_eq!(snap.average_time, 0.0);
        assert_eq!(snap.success_rate, 0.0);
        assert!(snap.popular_tools.is_empty());
        assert!(snap.recent_activity.is_empty());
        assert_eq!(snap.hourly_usage.len(), HOURLY_BUCKETS);
        assert!(snap.hourly_usage.iter().all(|b| b.uses == 0));
        assert_eq!(snap.daily_usage.len(), DAILY_BUCKETS);
        assert!(snap.daily_usage.iter().all(|b| b.uses == 0));
    }

    #[test]
    fn test_windowed_counts() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![
            ev(ts("2024-04-01 12:00:00"), "a", true, 1), // older than a month
            ev(ts("2024-04-20 12:00:00"), "a", true, 1), // month
            ev(ts("2024-05-05 12:00:00"), "a", true, 1), // week
            ev(ts("2024-05-09 23:59:59"), "a", true, 1), // yesterday
            ev(ts("2024-05-10 00:00:00"), "a", true, 1), // today, at midnight
            ev(ts("2024-05-10 11:59:00"), "a", true, 1), // today
            ev(ts("2024-05-10 13:00:00"), "a", true, 1), // future
        ];

        let snap = utc().snapshot(&events, &StatsQuery::default(), now, names);
        assert_eq!(snap.total_uses, 7);
        assert_eq!(snap.today_uses, 2);
        assert_eq!(snap.this_week_uses, 4);
        assert_eq!(snap.this_month_uses, 5);
    }

    #[test]
    fn test_today_respects_offset() {
        // 2024-05-10 03:00 UTC is still 2024-05-09 in UTC-5.
        let now = ts("2024-05-10 12:00:00");
        let events = vec![ev(ts("2024-05-10 03:00:00"), "a", true, 1)];

        assert_eq!(utc().today_count(&events, now), 1);
        assert_eq!(UsageAggregator::with_offset_minutes(-300).today_count(&events, now), 0);
    }

    #[test]
    fn test_mean_and_success_rate_are_rounded() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![
            ev(now - 3, "a", true, 1),
            ev(now - 2, "a", false, 2),
            ev(now - 1, "a", true, 2),
        ];

        let snap = utc().snapshot(&events, &StatsQuery::default(), now, names);
        assert_eq!(snap.average_time, 1.67);
        assert_eq!(snap.success_rate, 66.67);
    }

    #[test]
    fn test_popularity_ranking() {
        let now = ts("2024-05-10 12:00:00");
        let mut events = Vec::new();
        for i in 0..3 {
            events.push(ev(now - 100 + i, "three", true, 0));
        }
        for i in 0..5 {
            events.push(ev(now - 50 + i, "five", true, 0));
        }

        let snap = utc().snapshot(&events, &StatsQuery::default(), now, names);
        assert_eq!(snap.popular_tools.len(), 2);
        assert_eq!(snap.popular_tools[0].id, "five");
        assert_eq!(snap.popular_tools[0].uses, 5);
        assert_eq!(snap.popular_tools[0].name, "FIVE");
        assert_eq!(snap.popular_tools[1].id, "three");
    }

    #[test]
    fn test_popularity_ties_keep_first_appearance() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![
            ev(now - 4, "b", true, 0),
            ev(now - 3, "a", true, 0),
            ev(now - 2, "a", true, 0),
            ev(now - 1, "b", true, 0),
        ];
        let ranked = rank_tools(&events, 10);
        assert_eq!(ranked, vec![("b", 2), ("a", 2)]);
    }

    #[test]
    fn test_popularity_limit() {
        let now = ts("2024-05-10 12:00:00");
        let events: Vec<_> = (0..15).map(|i| ev(now - i, &format!("t{}", i), true, 0)).collect();

        let snap = utc().snapshot(&events, &StatsQuery::default(), now, names);
        assert_eq!(snap.popular_tools.len(), 10);

        let query = StatsQuery {
            popular_limit: 3,
            recent_limit: 2,
        };
        let snap = utc().snapshot(&events, &query, now, names);
        assert_eq!(snap.popular_tools.len(), 3);
        assert_eq!(snap.recent_activity.len(), 2);
    }

    #[test]
    fn test_recent_activity_is_most_recent_first() {
        let now = ts("2024-05-10 12:00:00");
        let events: Vec<_> = (0..12).map(|i| ev(now - 100 + i, &format!("t{}", i), i % 2 == 0, 0)).collect();

        let snap = utc().snapshot(&events, &StatsQuery::default(), now, names);
        assert_eq!(snap.recent_activity.len(), 10);
        assert_eq!(snap.recent_activity[0].tool_id, "t11");
        assert_eq!(snap.recent_activity[0].tool_name, "T11");
        assert!(!snap.recent_activity[0].success);
        assert_eq!(snap.recent_activity[9].tool_id, "t2");
    }

    #[test]
    fn test_hourly_histogram() {
        let now = ts("2024-05-10 12:30:00");
        let events = vec![
            ev(ts("2024-05-09 12:00:00"), "a", true, 0), // just outside 24h
            ev(ts("2024-05-09 13:15:00"), "a", true, 0),
            ev(ts("2024-05-10 09:05:00"), "a", true, 0),
            ev(ts("2024-05-10 09:55:00"), "a", true, 0),
        ];

        let hourly = utc().hourly_usage(&events, now);
        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly.iter().map(|b| b.hour).collect::<Vec<_>>(), (0..24).collect::<Vec<_>>());
        assert_eq!(hourly[9].uses, 2);
        assert_eq!(hourly[13].uses, 1);
        assert_eq!(hourly[12].uses, 0);
        assert_eq!(hourly.iter().map(|b| b.uses).sum::<usize>(), 3);
    }

    #[test]
    fn test_hourly_histogram_uses_local_hour() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![ev(ts("2024-05-10 10:00:00"), "a", true, 0)];

        let hourly = UsageAggregator::with_offset_minutes(120).hourly_usage(&events, now);
        assert_eq!(hourly[12].uses, 1);
    }

    #[test]
    fn test_daily_histogram() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![
            ev(ts("2024-05-10 08:00:00"), "a", true, 0),
            ev(ts("2024-05-10 09:00:00"), "a", true, 0),
            ev(ts("2024-05-01 09:00:00"), "a", true, 0),
            ev(ts("2024-04-11 13:00:00"), "a", true, 0), // oldest bucket
            ev(ts("2024-04-10 13:00:00"), "a", true, 0), // in 30×24h window, before oldest key
            ev(ts("2024-03-01 13:00:00"), "a", true, 0),
        ];

        let daily = utc().daily_usage(&events, now);
        assert_eq!(daily.len(), 30);
        assert_eq!(daily[0].date, "2024-04-11");
        assert_eq!(daily[29].date, "2024-05-10");
        assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(daily[29].uses, 2);
        assert_eq!(daily[0].uses, 1);
        let may_first = daily.iter().find(|b| b.date == "2024-05-01").unwrap();
        assert_eq!(may_first.uses, 1);
        assert_eq!(daily.iter().map(|b| b.uses).sum::<usize>(), 4);
    }

    #[test]
    fn test_tool_summary() {
        let now = ts("2024-05-10 12:00:00");
        let events = vec![
            ev(ts("2024-04-01 12:00:00"), "a", true, 4),
            ev(ts("2024-05-09 12:00:00"), "a", false, 2),
            ev(ts("2024-05-10 11:00:00"), "b", true, 9),
        ];

        let summary = utc().tool_summary(&events, "a", 7, now);
        assert_eq!(summary.total_uses, 2);
        assert_eq!(summary.recent_uses, 1);
        assert_eq!(summary.successes, 1);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.average_time, 3.0);

        let none = utc().tool_summary(&events, "zzz", 7, now);
        assert_eq!(none.total_uses, 0);
        assert_eq!(none.average_time, 0.0);
    }

    #[test]
    fn test_overview() {
        let registry = ToolRegistry::default_catalog().unwrap();
        let now = ts("2024-05-10 12:00:00");
        let events = vec![ev(now - 1, "json-formatter", true, 1)];

        let overview = utc().overview(&events, &registry, now);
        assert_eq!(overview.total_tools, registry.len());
        assert_eq!(overview.total_usage, 1);
        assert_eq!(overview.today_usage, 1);
        assert!(overview.categories.iter().all(|c| c.tools > 0));
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let agg = UsageAggregator::with_offset_minutes(100_000);
        assert!(matches!(agg.zone(), StatsZone::Fixed(o) if o.local_minus_utc() == 0));
    }

    // Serializes tests that change the process time zone.
    static TZ_LOCK: Mutex<()> = Mutex::new(());

    struct TzGuard(Option<std::ffi::OsString>);

    impl TzGuard {
        fn set(tz: &str) -> Self {
            let previous = std::env::var_os("TZ");
            unsafe {
                std::env::set_var("TZ", tz);
            }
            Self(previous)
        }
    }

    impl Drop for TzGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.0 {
                    Some(tz) => std::env::set_var("TZ", tz),
                    None => std::env::remove_var("TZ"),
                }
            }
        }
    }

    const NEW_YORK: &str = "EST5EDT,M3.2.0,M11.1.0";

    #[test]
    fn test_local_zone_applies_dst_per_timestamp() {
        let _lock = TZ_LOCK.lock().unwrap();
        let _tz = TzGuard::set(NEW_YORK);
        let agg = UsageAggregator::local();

        // Queried in EDT; the event is 2024-03-09 23:30 EST.
        let now = ts("2024-03-20 12:00:00");
        let events = vec![ev(ts("2024-03-10 04:30:00"), "a", true, 0)];
        let daily = agg.daily_usage(&events, now);
        let bucket = daily.iter().find(|b| b.uses == 1).unwrap();
        assert_eq!(bucket.date, "2024-03-09");

        // 2024-03-10 05:30 UTC is 00:30 EST, before the 02:00 switch.
        let now = ts("2024-03-10 12:00:00");
        let events = vec![ev(ts("2024-03-10 05:30:00"), "a", true, 0)];
        let hourly = agg.hourly_usage(&events, now);
        assert_eq!(hourly[0].uses, 1);
    }

    #[test]
    fn test_local_today_starts_at_midnight_before_fall_back() {
        let _lock = TZ_LOCK.lock().unwrap();
        let _tz = TzGuard::set(NEW_YORK);
        let agg = UsageAggregator::local();

        // 2024-11-03 starts at 04:00 UTC (EDT) and is queried at 07:00 EST.
        let now = ts("2024-11-03 12:00:00");
        let events = vec![
            ev(ts("2024-11-03 03:30:00"), "a", true, 0),
            ev(ts("2024-11-03 04:30:00"), "a", true, 0),
        ];
        assert_eq!(agg.today_count(&events, now), 1);
    }
}
