//! Icon classification table
//!
//! Maps a raw textual weather condition (the `Weather` field of a
//! map-click observation) to one of a small fixed set of icon categories.
//! The table is a JSON object of category → list of matching condition
//! strings, loaded once at startup. Lookup walks categories in file order
//! and the first category containing the condition wins.

use anyhow::{Context, Result, bail};
use std::path::Path;

/// Sentinel returned when no category matches a condition.
pub const ICON_UNAVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Default)]
pub struct IconTable {
    // (category, conditions) pairs in file order
    classes: Vec<(String, Vec<String>)>,
}

impl IconTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon class file {:?}", path))?;

        let table = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse icon class file {:?}", path))?;

        tracing::info!("Loaded {} icon classes from {:?}", table.classes.len(), path);
        Ok(table)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to deserialize icon class JSON")?;

        let serde_json::Value::Object(map) = value else {
            bail!("Icon class file must be a JSON object of category -> [conditions]");
        };

        let mut classes = Vec::with_capacity(map.len());
        for (category, conditions) in map {
            let serde_json::Value::Array(entries) = conditions else {
                bail!("Icon class '{}' is not an array of conditions", category);
            };
            let conditions: Vec<String> = entries
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => Ok(s),
                    other => bail!("Icon class '{}' has a non-string entry: {}", category, other),
                })
                .collect::<Result<_>>()?;
            classes.push((category, conditions));
        }

        Ok(Self { classes })
    }

    pub fn from_classes(classes: Vec<(String, Vec<String>)>) -> Self {
        Self { classes }
    }

    /// Classify a raw condition string. First matching category in table
    /// order wins; unmatched conditions yield [`ICON_UNAVAILABLE`].
    pub fn classify(&self, condition: &str) -> &str {
        self.classes
            .iter()
            .find(|(_, conditions)| conditions.iter().any(|c| c == condition))
            .map(|(category, _)| category.as_str())
            .unwrap_or(ICON_UNAVAILABLE)
    }
}
