//! Saved spreadsheet links, kept in a string key-value store.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Month, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{ChartRole, ChartSeries, Dataset};

pub const LINKS_KEY: &str = "spreadsheetLinks";
pub const RECENT_KEY: &str = "recentSpreadsheetChoice";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Corrupt entry under {key}: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Browser-style storage: string keys to string values.
pub trait LinkRegistry {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: HashMap<String, String>,
}

impl LinkRegistry for MemoryRegistry {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLink {
    pub id: String,
    pub link: String,
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The last sheet opened for visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentChoice {
    pub link: String,
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    pub range: String,
}

pub fn load_links(registry: &impl LinkRegistry) -> Result<Vec<SheetLink>, RegistryError> {
    match registry.get(LINKS_KEY) {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| RegistryError::Corrupt {
            key: LINKS_KEY,
            source,
        }),
        None => Ok(Vec::new()),
    }
}

pub fn save_links(registry: &mut impl LinkRegistry, links: &[SheetLink]) -> Result<(), RegistryError> {
    let raw = serde_json::to_string(links).map_err(|source| RegistryError::Encode {
        key: LINKS_KEY,
        source,
    })?;
    debug!(count = links.len(), "saving spreadsheet links");
    registry.set(LINKS_KEY, raw);
    Ok(())
}

pub fn find_link<'a>(links: &'a [SheetLink], spreadsheet_id: &str, range: &str) -> Option<&'a SheetLink> {
    links
        .iter()
        .find(|l| l.spreadsheet_id == spreadsheet_id && l.range == range)
}

/// Links whose URL contains `query`, case-insensitively.
pub fn search_links<'a>(links: &'a [SheetLink], query: &str) -> Vec<&'a SheetLink> {
    let needle = query.to_lowercase();
    links
        .iter()
        .filter(|l| l.link.to_lowercase().contains(&needle))
        .collect()
}

pub fn load_recent(registry: &impl LinkRegistry) -> Result<Option<RecentChoice>, RegistryError> {
    registry
        .get(RECENT_KEY)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| RegistryError::Corrupt {
                key: RECENT_KEY,
                source,
            })
        })
        .transpose()
}

pub fn save_recent(registry: &mut impl LinkRegistry, choice: &RecentChoice) -> Result<(), RegistryError> {
    let raw = serde_json::to_string(choice).map_err(|source| RegistryError::Encode {
        key: RECENT_KEY,
        source,
    })?;
    registry.set(RECENT_KEY, raw);
    Ok(())
}

static SHEET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("sheet id pattern is valid"));

/// The `<id>` in `https://docs.google.com/spreadsheets/d/<id>/edit`.
pub fn spreadsheet_id_from_link(link: &str) -> Option<&str> {
    if !link.contains("docs.google.com/spreadsheets") {
        return None;
    }
    SHEET_ID_RE
        .captures(link)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn month_name(ts: &DateTime<Utc>) -> Option<&'static str> {
    u8::try_from(ts.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Created and updated counts per month name, months in first-seen order.
/// Links without a timestamp are left out of that dataset.
pub fn link_activity_by_month(links: &[SheetLink]) -> ChartSeries {
    let mut months: IndexMap<&'static str, (usize, usize)> = IndexMap::new();

    for link in links {
        if let Some(name) = link.created_at.as_ref().and_then(month_name) {
            months.entry(name).or_default().0 += 1;
        }
        if let Some(name) = link.updated_at.as_ref().and_then(month_name) {
            months.entry(name).or_default().1 += 1;
        }
    }

    let created = months.values().map(|&(c, _)| c as f64).collect();
    let updated = months.values().map(|&(_, u)| u as f64).collect();

    ChartSeries {
        labels: months.keys().map(|m| m.to_string()).collect(),
        datasets: vec![
            Dataset::styled("Created At", created, ChartRole::Bar),
            Dataset::styled("Updated At", updated, ChartRole::Bar),
        ],
    }
}
