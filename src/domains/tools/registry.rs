//! Tool Registry - the in-memory catalog of transforms.
//!
//! This module provides:
//! - Registration of transforms, keyed by descriptor id
//! - Exact lookup, category filtering and free-text search
//! - The built-in default catalog
//!
//! The registry is filled once at startup and then shared read-only behind an
//! `Arc`, so lookups need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::definitions;
use super::descriptor::{Category, Locale};
use super::error::ToolError;
use super::handlers::Transform;

// ============================================================================
// Tool Registry
// ============================================================================

/// Catalog of transforms in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Transform>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding every built-in transform.
    pub fn default_catalog() -> Result<Self, ToolError> {
        let mut registry = Self::new();
        for tool in definitions::all_tools()? {
            registry.register(tool);
        }
        Ok(registry)
    }

    /// Insert a transform, replacing any previous one with the same id.
    ///
    /// A replacement keeps the catalog position of the tool it replaces.
    pub fn register(&mut self, tool: Arc<dyn Transform>) {
        let id = tool.descriptor().id().to_string();
        match self.index.get(&id) {
            Some(&slot) => {
                warn!("Tool {} registered twice; replacing previous definition", id);
                self.tools[slot] = tool;
            }
            None => {
                debug!("Registering tool: {}", id);
                self.index.insert(id, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Transform>> {
        self.index.get(id).map(|&slot| self.tools[slot].clone())
    }

    /// All transforms, in registration order.
    pub fn list_all(&self) -> Vec<Arc<dyn Transform>> {
        self.tools.clone()
    }

    /// Transforms of one category, in registration order.
    pub fn list_by_category(&self, category: Category) -> Vec<Arc<dyn Transform>> {
        self.tools
            .iter()
            .filter(|t| t.descriptor().category() == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over default-locale name and description.
    pub fn search(&self, query: &str) -> Vec<Arc<dyn Transform>> {
        self.search_in(query, Locale::DEFAULT)
    }

    /// Case-insensitive substring search over one locale's name and description.
    ///
    /// A blank query matches nothing.
    pub fn search_in(&self, query: &str, locale: Locale) -> Vec<Arc<dyn Transform>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.tools
            .iter()
            .filter(|t| {
                let content = t.descriptor().localized_content(locale);
                content.name.to_lowercase().contains(&needle)
                    || content.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Names of every catalog category.
    pub fn categories(&self) -> Vec<&'static str> {
        Category::ALL.iter().map(Category::as_str).collect()
    }

    /// Number of registered tools per category, for categories that have any.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.list_by_category(c).len()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// Registered tool ids, in registration order.
    pub fn tool_ids(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor().id()).collect()
    }

    /// Default-locale display name of a tool, or the id itself when unknown.
    pub fn display_name(&self, id: &str) -> String {
        self.get(id)
            .map(|t| t.descriptor().name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
