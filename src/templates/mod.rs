//! Canonical PineScript skeletons, looked up by category and fuzzy name.
//!
//! The registry is built on first use and never changes afterwards, so
//! lookups need no locking.

mod indicator;
mod strategy;

use crate::error::{Error, Result};
use crate::log_debug;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Kind of script a template produces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TemplateCategory {
    /// Places orders
    Strategy,
    /// Computes and plots values only
    Indicator,
}

impl TemplateCategory {
    pub const ALL: [Self; 2] = [Self::Strategy, Self::Indicator];
}

impl FromStr for TemplateCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::iter()
            .find(|category| category.to_string() == normalized)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A named skeleton and the names it answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub category: TemplateCategory,
    pub canonical_name: &'static str,
    /// Lowercase alternative names
    pub aliases: &'static [&'static str],
    pub body: &'static str,
}

impl TemplateEntry {
    fn names(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.canonical_name.to_lowercase())
            .chain(self.aliases.iter().map(|alias| alias.to_lowercase()))
    }

    fn matches_exactly(&self, query: &str) -> bool {
        self.names().any(|name| name == query)
    }

    fn contains(&self, query: &str) -> bool {
        self.names().any(|name| name.contains(query))
    }
}

/// Templates of one category in registration order, plus its fallback
#[derive(Debug)]
struct CategoryTemplates {
    entries: Vec<TemplateEntry>,
    fallback: TemplateEntry,
}

/// Immutable lookup table of all templates
#[derive(Debug)]
pub struct TemplateRegistry {
    strategies: CategoryTemplates,
    indicators: CategoryTemplates,
}

static REGISTRY: LazyLock<TemplateRegistry> = LazyLock::new(TemplateRegistry::build);

impl TemplateRegistry {
    fn build() -> Self {
        let registry = Self {
            strategies: CategoryTemplates {
                entries: strategy::entries(),
                fallback: strategy::fallback(),
            },
            indicators: CategoryTemplates {
                entries: indicator::entries(),
                fallback: indicator::fallback(),
            },
        };
        log_debug!(
            "Template registry built: {} strategies, {} indicators",
            registry.strategies.entries.len(),
            registry.indicators.entries.len()
        );
        registry
    }

    /// The process-wide registry
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    fn category(&self, category: TemplateCategory) -> &CategoryTemplates {
        match category {
            TemplateCategory::Strategy => &self.strategies,
            TemplateCategory::Indicator => &self.indicators,
        }
    }

    /// Find the best entry for `query`, falling back to the category default.
    ///
    /// Exact name or alias matches win over substring matches; among
    /// substring matches the earliest registered entry wins. A blank query
    /// selects the fallback.
    pub fn lookup(&self, category: TemplateCategory, query: &str) -> &TemplateEntry {
        let templates = self.category(category);
        let normalized = query.trim().to_lowercase();

        if normalized.is_empty() {
            return &templates.fallback;
        }

        templates
            .entries
            .iter()
            .find(|entry| entry.matches_exactly(&normalized))
            .or_else(|| {
                templates
                    .entries
                    .iter()
                    .find(|entry| entry.contains(&normalized))
            })
            .unwrap_or_else(|| {
                log_debug!("No {} template matches '{}', using fallback", category, query);
                &templates.fallback
            })
    }

    /// Template body for `query` in `category`
    pub fn resolve(&self, category: TemplateCategory, query: &str) -> &'static str {
        self.lookup(category, query).body
    }

    /// Canonical names in registration order, fallback last
    pub fn names(&self, category: TemplateCategory) -> Vec<&'static str> {
        let templates = self.category(category);
        templates
            .entries
            .iter()
            .chain(std::iter::once(&templates.fallback))
            .map(|entry| entry.canonical_name)
            .collect()
    }
}

/// Resolve a template from an unchecked category name.
///
/// Fails only when `category` is not recognized; an unmatched `query`
/// yields the category's generic skeleton.
pub fn resolve_template(category: &str, query: &str) -> Result<&'static str> {
    let category: TemplateCategory = category.parse()?;
    Ok(TemplateRegistry::global().resolve(category, query))
}

/// Canonical template names available for `category`
pub fn list_templates(category: &str) -> Result<Vec<&'static str>> {
    let category: TemplateCategory = category.parse()?;
    Ok(TemplateRegistry::global().names(category))
}
