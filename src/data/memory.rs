// In-memory model
// Serves records loaded once at startup from a JSON or TOML seed file

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{DataError, GetParams, Model, Record};

/// Errors while reading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON seed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML seed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("seed entry #{0} is not an object")]
    NotAnObject(usize),

    #[error("unsupported seed file extension: {0}")]
    UnsupportedFormat(String),
}

/// TOML seed layout: `[[records]]` tables
#[derive(Debug, Deserialize)]
struct TomlSeed {
    #[serde(default)]
    records: Vec<Record>,
}

/// Model backed by a fixed list of records
#[derive(Debug, Clone)]
pub struct MemoryModel {
    records: Vec<Record>,
    id_field: String,
}

impl MemoryModel {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            id_field: "id".to_string(),
        }
    }

    /// Use a field other than `id` as the record key
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Model for MemoryModel {
    async fn get(&self, params: &GetParams) -> Result<Vec<Record>, DataError> {
        let limit = params.limit as usize;
        let skip = (params.page.saturating_sub(1) as usize).saturating_mul(limit);

        let found = self
            .records
            .iter()
            .filter(|record| {
                record
                    .get(&self.id_field)
                    .is_some_and(|value| params.filters.id.matches(value))
            })
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        Ok(found)
    }
}

/// Load records from a `.json` or `.toml` file
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Record>, SeedError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json_seed(&content),
        Some("toml") => parse_toml_seed(&content),
        other => Err(SeedError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Parse a top-level JSON array of objects
pub fn parse_json_seed(content: &str) -> Result<Vec<Record>, SeedError> {
    let entries: Vec<Value> = serde_json::from_str(content)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(record) => Ok(record),
            _ => Err(SeedError::NotAnObject(index)),
        })
        .collect()
}

/// Parse a TOML document holding a `records` array of tables
pub fn parse_toml_seed(content: &str) -> Result<Vec<Record>, SeedError> {
    let seed: TomlSeed = toml::from_str(content)?;
    Ok(seed.records)
}
