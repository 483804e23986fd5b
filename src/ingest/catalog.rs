// src/ingest/catalog.rs
//! Query catalog: what the search fan-out asks for.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::Category;

fn default_num_results() -> u32 {
    10
}

/// One (query, category, result cap) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub query: String,
    pub category: Category,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
}

impl CatalogEntry {
    pub fn new(query: &str, category: Category, num_results: u32) -> Self {
        Self {
            query: query.to_string(),
            category,
            num_results,
        }
    }
}

/// Built-in tech feed queries.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "latest technology trends startups 2025",
            Category::Startups,
            8,
        ),
        CatalogEntry::new(
            "software engineering emerging trends",
            Category::SoftwareEngineering,
            8,
        ),
        CatalogEntry::new(
            "AI startup news artificial intelligence",
            Category::Ai,
            8,
        ),
        CatalogEntry::new(
            "engineering firm technology innovations",
            Category::Engineering,
            6,
        ),
    ]
}

/// On-disk catalog encodings. TOML uses `[[entries]]` tables, JSON a bare array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, s: &str) -> Result<Vec<CatalogEntry>> {
        let entries = match self {
            Self::Toml => {
                #[derive(Deserialize)]
                struct Tables {
                    entries: Vec<CatalogEntry>,
                }
                toml::from_str::<Tables>(s)?.entries
            }
            Self::Json => serde_json::from_str::<Vec<CatalogEntry>>(s)?,
        };
        Ok(drop_blank_queries(entries))
    }
}

/// Read a catalog file. The extension picks the format; anything else is
/// tried as JSON first, then TOML.
pub fn load_catalog_from(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading catalog from {}", path.display()))?;
    let parsed = match CatalogFormat::from_path(path) {
        Some(format) => format.parse(&content),
        None => CatalogFormat::Json
            .parse(&content)
            .or_else(|_| CatalogFormat::Toml.parse(&content)),
    };
    parsed.with_context(|| format!("parsing catalog {}", path.display()))
}

const FALLBACK_PATHS: [&str; 2] = ["config/trends_catalog.toml", "config/trends_catalog.json"];

/// Resolve the query catalog for a run.
///
/// An explicit path (from `AppConfig::catalog_path`) must exist. Without one,
/// `config/trends_catalog.toml` then `config/trends_catalog.json` are used when
/// present, otherwise the built-in queries.
pub fn load_catalog(explicit: Option<&Path>) -> Result<Vec<CatalogEntry>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(anyhow!("catalog path {} does not exist", path.display()));
        }
        return load_catalog_from(path);
    }
    for candidate in FALLBACK_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return load_catalog_from(path);
        }
    }
    Ok(default_catalog())
}

fn drop_blank_queries(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter_map(|mut e| {
            e.query = e.query.trim().to_string();
            (!e.query.is_empty()).then_some(e)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_each_feed_category() {
        let cats: Vec<Category> = default_catalog().iter().map(|e| e.category).collect();
        assert_eq!(
            cats,
            vec![
                Category::Startups,
                Category::SoftwareEngineering,
                Category::Ai,
                Category::Engineering
            ]
        );
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("a/catalog.TOML")),
            Some(CatalogFormat::Toml)
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("catalog.json")),
            Some(CatalogFormat::Json)
        );
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), None);
    }

    #[test]
    fn toml_and_json_formats_work() {
        let toml = r#"
[[entries]]
query = "  rust web frameworks "
category = "software_engineering"
num_results = 4

[[entries]]
query = ""
category = "ai"
"#;
        let out = CatalogFormat::Toml.parse(toml).unwrap();
        assert_eq!(
            out,
            vec![CatalogEntry::new(
                "rust web frameworks",
                Category::SoftwareEngineering,
                4
            )]
        );

        let json = r#"[{"query": "chip startups", "category": "startups"}]"#;
        let out = CatalogFormat::Json.parse(json).unwrap();
        assert_eq!(out[0].num_results, 10);
        assert_eq!(out[0].category, Category::Startups);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let json = r#"[{"query": "x", "category": "sports"}]"#;
        assert!(CatalogFormat::Json.parse(json).is_err());
    }
}
