//! Data access contract
//!
//! The handler never talks to storage directly. It sees a [`Model`] that
//! answers a single query shape, [`GetParams`], with a list of records.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub use memory::{load_seed_file, MemoryModel, SeedError};

/// A single retrieved item
pub type Record = Map<String, Value>;

/// Record identifier taken from the first path parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(Number),
    Text(String),
}

impl RecordId {
    /// Accepts only JSON strings and numbers
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }

    /// Loose comparison against a stored field: `10` matches `"10"`.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Text(a), Value::String(b)) => a == b,
            (Self::Number(a), Value::Number(b)) => a == b,
            (Self::Text(a), Value::Number(b)) => *a == b.to_string(),
            (Self::Number(a), Value::String(b)) => a.to_string() == *b,
            _ => false,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub id: RecordId,
}

/// Query handed to [`Model::get`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParams {
    pub filters: Filters,
    pub page: u32,
    pub limit: u32,
}

impl GetParams {
    /// Single-item page for one identifier
    pub const fn by_id(id: RecordId) -> Self {
        Self {
            filters: Filters { id },
            page: 1,
            limit: 1,
        }
    }
}

/// Errors surfaced by a data-access collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("data backend failure: {0}")]
    Backend(String),
}

impl DataError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Lookup capability for one entity. An empty result means not found.
#[async_trait]
pub trait Model: Send + Sync {
    async fn get(&self, params: &GetParams) -> Result<Vec<Record>, DataError>;
}
