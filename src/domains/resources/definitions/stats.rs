//! Usage statistics resources.

use super::{ResourceDefinition, ResourceTemplateDefinition};

/// Aggregate usage statistics.
///
/// Accepts `?popularLimit=N&recentLimit=N` to size the ranking lists.
pub struct StatsSnapshotResource;

impl ResourceDefinition for StatsSnapshotResource {
    const URI: &'static str = "toolkit://stats/snapshot";
    const NAME: &'static str = "Usage Statistics";
    const DESCRIPTION: &'static str = "Totals, windowed counts, success rate, popular tools, recent activity and hourly/daily histograms";
}

/// Usage summary of one tool.
///
/// Accepts `?days=N` (default 7) for the recent-usage window.
pub struct ToolStatsTemplate;

impl ResourceTemplateDefinition for ToolStatsTemplate {
    const URI_TEMPLATE: &'static str = "toolkit://stats/tools/{id}";
    const NAME: &'static str = "Tool Usage";
    const TITLE: &'static str = "Usage of One Tool";
    const DESCRIPTION: &'static str =
        "Total and recent uses, successes, failures and mean processing time of one tool";
}
