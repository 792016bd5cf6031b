//! User allow-list
//!
//! Loaded once at process start from a JSON file and never mutated, so it
//! is safe for concurrent readers without locking. The file is either a
//! JSON array of UUID strings or a JSON object whose keys are UUID strings.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashSet<Uuid>,
}

impl UserDirectory {
    /// Load the allow-list from a JSON file. A malformed file or a
    /// non-UUID entry aborts startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read user file {:?}", path))?;

        let directory = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse user file {:?}", path))?;

        tracing::info!("Loaded {} users from {:?}", directory.len(), path);
        Ok(directory)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to deserialize user JSON")?;

        let ids: Vec<&str> = match &value {
            serde_json::Value::Array(entries) => entries
                .iter()
                .map(|v| v.as_str().context("User entry is not a string"))
                .collect::<Result<_>>()?,
            serde_json::Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => bail!("User file must be a JSON array or object of UUID strings"),
        };

        let mut users = HashSet::with_capacity(ids.len());
        for id in ids {
            let parsed = Uuid::parse_str(id)
                .with_context(|| format!("User entry '{}' is not a valid UUID", id))?;
            users.insert(parsed);
        }

        Ok(Self { users })
    }

    pub fn from_ids<I: IntoIterator<Item = Uuid>>(ids: I) -> Self {
        Self {
            users: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.users.contains(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
