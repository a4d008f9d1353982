//! Entity container: the addressable roots of a service.

use serde::{Deserialize, Serialize};

/// Entity sets and singletons exposed by a schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityContainer {
    pub name: String,
    #[serde(default)]
    pub entity_sets: Vec<EntitySet>,
    #[serde(default)]
    pub singletons: Vec<Singleton>,
}

/// A collection of entities addressable by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub name: String,
    /// Identifier of the element entity type.
    pub entity_type: String,
}

/// A single, always-present entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Singleton {
    pub name: String,
    #[serde(rename = "type")]
    pub type_identifier: String,
}

impl EntityContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_sets: Vec::new(),
            singletons: Vec::new(),
        }
    }

    /// Add an entity set.
    pub fn with_entity_set(
        mut self,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        self.entity_sets.push(EntitySet {
            name: name.into(),
            entity_type: entity_type.into(),
        });
        self
    }

    /// Add a singleton.
    pub fn with_singleton(
        mut self,
        name: impl Into<String>,
        type_identifier: impl Into<String>,
    ) -> Self {
        self.singletons.push(Singleton {
            name: name.into(),
            type_identifier: type_identifier.into(),
        });
        self
    }

    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }

    pub fn singleton(&self, name: &str) -> Option<&Singleton> {
        self.singletons.iter().find(|s| s.name == name)
    }
}
