//! Resource URI handling.
//!
//! Turns a `toolkit://` URI into a typed [`ResourceRequest`]. Path segments
//! are percent-decoded; query parameters select the locale, ranking sizes
//! and summary window.

use serde::Deserialize;

use super::error::ResourceError;
use crate::domains::tools::{Category, Locale};
use crate::domains::usage::StatsQuery;

/// URI scheme of every resource this server exposes.
pub const SCHEME: &str = "toolkit://";

/// Default window of a per-tool usage summary, in days.
pub const DEFAULT_SUMMARY_DAYS: u32 = 7;

/// What a resource URI asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceRequest {
    CatalogTools,
    CatalogCategories,
    CatalogOverview,
    StatsSnapshot(StatsQuery),
    Tool(String),
    Search(String),
    Category(Category),
    ToolStats { tool_id: String, days: u32 },
}

/// A parsed resource URI.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub request: ResourceRequest,
    pub locale: Locale,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReadParams {
    locale: Option<String>,
    days: Option<u32>,
}

impl ParsedRequest {
    /// Parse a resource URI.
    pub fn parse(uri: &str) -> Result<Self, ResourceError> {
        let rest = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| ResourceError::invalid_uri(uri))?;
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        let params: ReadParams = serde_urlencoded::from_str(query)
            .map_err(|e| ResourceError::invalid_uri(format!("{}: {}", uri, e)))?;
        let locale = params
            .locale
            .as_deref()
            .map(Locale::from_tag)
            .unwrap_or_default();

        let segments: Vec<String> = path
            .split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .map_err(|_| ResourceError::invalid_uri(uri))
            })
            .collect::<Result<_, _>>()?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let request = match segments.as_slice() {
            ["catalog", "tools"] => ResourceRequest::CatalogTools,
            ["catalog", "categories"] => ResourceRequest::CatalogCategories,
            ["catalog", "overview"] => ResourceRequest::CatalogOverview,
            ["stats", "snapshot"] => {
                let query: StatsQuery = serde_urlencoded::from_str(query)
                    .map_err(|e| ResourceError::invalid_uri(format!("{}: {}", uri, e)))?;
                ResourceRequest::StatsSnapshot(query)
            }
            ["catalog", "tools", id] if !id.is_empty() => ResourceRequest::Tool(id.to_string()),
            ["catalog", "search", text] => ResourceRequest::Search(text.to_string()),
            ["catalog", "category", name] => ResourceRequest::Category(
                Category::parse(name).ok_or_else(|| ResourceError::not_found(uri))?,
            ),
            ["stats", "tools", id] if !id.is_empty() => ResourceRequest::ToolStats {
                tool_id: id.to_string(),
                days: params.days.unwrap_or(DEFAULT_SUMMARY_DAYS),
            },
            _ => return Err(ResourceError::not_found(uri)),
        };

        Ok(Self { request, locale })
    }
}
