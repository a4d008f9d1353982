//! Structural and navigation properties.

use serde::{Deserialize, Serialize};

/// A structural property of a complex or entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name (unique within the declaring type).
    pub name: String,
    /// Type identifier, e.g. `Edm.String` or `Collection(graph.thumbnail)`.
    #[serde(rename = "type")]
    pub type_identifier: String,
    /// Whether the property accepts null.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// A navigation property. The target is referenced by identifier and
/// resolved on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationProperty {
    pub name: String,
    /// Target type identifier, possibly collection-wrapped.
    #[serde(rename = "type")]
    pub type_identifier: String,
    /// Whether the target is contained in the declaring entity.
    #[serde(default)]
    pub contains_target: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

/// Entity key: the properties that identify an instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Key {
    /// Names of the key properties, in declaration order.
    pub property_refs: Vec<String>,
}

fn default_nullable() -> bool {
    true
}

impl Property {
    /// Create a nullable property.
    pub fn new(name: impl Into<String>, type_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_identifier: type_identifier.into(),
            nullable: true,
            description: None,
        }
    }

    /// Mark the property as non-nullable.
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl NavigationProperty {
    /// Create a navigation property.
    pub fn new(name: impl Into<String>, type_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_identifier: type_identifier.into(),
            contains_target: false,
            nullable: true,
        }
    }

    /// Mark the target as contained.
    pub fn contained(mut self) -> Self {
        self.contains_target = true;
        self
    }
}

impl Key {
    /// Single-property key.
    pub fn single(property: impl Into<String>) -> Self {
        Self {
            property_refs: vec![property.into()],
        }
    }

    pub fn contains(&self, property: &str) -> bool {
        self.property_refs.iter().any(|p| p == property)
    }
}
