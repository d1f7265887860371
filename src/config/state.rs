// Application state module
// Holds the configuration, entity registry and per-entity formatters

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::types::{Config, EntityConfig};
use crate::data::{load_seed_file, MemoryModel, Record, SeedError};
use crate::handler::Formatter;
use crate::registry::EntityRegistry;

/// Errors while building state from configuration
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("entity '{entity}': {source}")]
    Seed {
        entity: String,
        #[source]
        source: SeedError,
    },

    #[error("entity '{0}' is declared more than once")]
    DuplicateEntity(String),
}

/// Application state
pub struct AppState {
    pub config: Config,
    pub registry: EntityRegistry,
    pub formatters: HashMap<String, Formatter>,
}

impl AppState {
    /// Build state from configuration, loading every entity's seed file
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let registry = build_registry(&config.entities)?;
        let formatters = build_formatters(&config.entities);

        Ok(Self::with_parts(config.clone(), registry, formatters))
    }

    /// Assemble state from an already populated registry
    pub fn with_parts(
        config: Config,
        registry: EntityRegistry,
        formatters: HashMap<String, Formatter>,
    ) -> Self {
        Self {
            config,
            registry,
            formatters,
        }
    }

    pub fn formatter(&self, entity: &str) -> Option<Formatter> {
        self.formatters.get(entity).cloned()
    }
}

/// One in-memory model per configured entity
pub fn build_registry(entities: &[EntityConfig]) -> Result<EntityRegistry, StartupError> {
    let mut registry = EntityRegistry::new();

    for entity in entities {
        if registry.contains(&entity.name) {
            return Err(StartupError::DuplicateEntity(entity.name.clone()));
        }

        let records = match &entity.records_file {
            Some(path) => load_seed_file(path).map_err(|source| StartupError::Seed {
                entity: entity.name.clone(),
                source,
            })?,
            None => Vec::new(),
        };

        let model = MemoryModel::new(records).with_id_field(entity.id_field.clone());
        tracing::info!(
            entity = %entity.name,
            records = model.len(),
            "registered entity"
        );
        registry.register_model(entity.name.clone(), Arc::new(model));
    }

    Ok(registry)
}

fn build_formatters(entities: &[EntityConfig]) -> HashMap<String, Formatter> {
    entities
        .iter()
        .filter(|entity| !entity.hidden_fields.is_empty())
        .map(|entity| (entity.name.clone(), hide_fields(entity.hidden_fields.clone())))
        .collect()
}

/// Formatter removing the given fields from a record
pub fn hide_fields(fields: Vec<String>) -> Formatter {
    Arc::new(move |mut record: Record| {
        for field in &fields {
            record.remove(field);
        }
        record
    })
}
