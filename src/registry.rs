//! Entity registry
//!
//! Maps entity names to model providers. Populated once at startup and then
//! shared read-only; lookups are exact key matches.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::data::Model;

/// Errors raised while resolving an entity name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Entity '{0}' does not exist")]
    UnknownEntity(String),

    #[error("Entity '{entity}' could not be instantiated: {message}")]
    Provider { entity: String, message: String },
}

/// Builds a model instance for one entity
pub type Provider = Arc<dyn Fn() -> Result<Arc<dyn Model>, ResolveError> + Send + Sync>;

/// Resolution capability used by the request handler
pub trait EntityResolver: Send + Sync {
    fn resolve(&self, entity: &str) -> Result<Arc<dyn Model>, ResolveError>;
}

#[derive(Default, Clone)]
pub struct EntityRegistry {
    providers: HashMap<String, Provider>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. A later registration under the same name replaces
    /// the earlier one.
    pub fn register<F>(&mut self, entity: impl Into<String>, provider: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn Model>, ResolveError> + Send + Sync + 'static,
    {
        self.providers.insert(entity.into(), Arc::new(provider));
        self
    }

    /// Register a shared model instance handed out on every resolution
    pub fn register_model(&mut self, entity: impl Into<String>, model: Arc<dyn Model>) -> &mut Self {
        self.register(entity, move || Ok(Arc::clone(&model)))
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.providers.contains_key(entity)
    }

    /// Registered entity names, sorted
    pub fn entities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl EntityResolver for EntityRegistry {
    fn resolve(&self, entity: &str) -> Result<Arc<dyn Model>, ResolveError> {
        let provider = self
            .providers
            .get(entity)
            .ok_or_else(|| ResolveError::UnknownEntity(entity.to_string()))?;
        provider()
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("entities", &self.entities())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryModel;

    #[test]
    fn test_resolve_registered_entity() {
        let mut registry = EntityRegistry::new();
        registry.register_model("product", Arc::new(MemoryModel::default()));

        assert!(registry.resolve("product").is_ok());
        assert!(registry.contains("product"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let mut registry = EntityRegistry::new();
        registry.register_model("product", Arc::new(MemoryModel::default()));

        for name in ["Product", "products", "product ", ""] {
            let err = registry.resolve(name).err().unwrap();
            assert_eq!(err, ResolveError::UnknownEntity(name.to_string()));
        }
    }

    #[test]
    fn test_unknown_entity_message() {
        let registry = EntityRegistry::new();
        let err = registry.resolve("some-entity").err().unwrap();
        assert_eq!(err.to_string(), "Entity 'some-entity' does not exist");
    }

    #[test]
    fn test_provider_failure_is_surfaced() {
        let mut registry = EntityRegistry::new();
        registry.register("broken", || {
            Err(ResolveError::Provider {
                entity: "broken".to_string(),
                message: "connection refused".to_string(),
            })
        });

        let err = registry.resolve("broken").err().unwrap();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_entities_sorted() {
        let mut registry = EntityRegistry::new();
        registry
            .register_model("zeta", Arc::new(MemoryModel::default()))
            .register_model("alpha", Arc::new(MemoryModel::default()));
        assert_eq!(registry.entities(), vec!["alpha", "zeta"]);
    }
}
