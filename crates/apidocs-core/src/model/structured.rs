//! Complex and entity types.

use super::property::{Key, NavigationProperty, Property};
use serde::{Deserialize, Serialize};

/// A structured type without identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexType {
    /// Type name (unique among the schema's complex types).
    pub name: String,
    /// Identifier of the base type, if any.
    #[serde(default)]
    pub base_type: Option<String>,
    /// Whether instances may carry undeclared properties.
    #[serde(default)]
    pub open_type: bool,
    #[serde(default)]
    pub abstract_type: bool,
    /// Structural properties in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A structured type with a key and navigation properties.
///
/// The structural part is shared with [`ComplexType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    #[serde(flatten)]
    pub complex: ComplexType,
    #[serde(default)]
    pub key: Option<Key>,
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl ComplexType {
    /// Create an empty complex type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            open_type: false,
            abstract_type: false,
            properties: Vec::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Add multiple properties.
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn open(mut self) -> Self {
        self.open_type = true;
        self
    }

    /// Get a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl EntityType {
    /// Create an entity type keyed on `key_property`.
    pub fn new(name: impl Into<String>, key_property: impl Into<String>) -> Self {
        Self {
            complex: ComplexType::new(name),
            key: Some(Key::single(key_property)),
            navigation_properties: Vec::new(),
        }
    }

    /// Create an entity type without a key (e.g. a derived type).
    pub fn without_key(name: impl Into<String>) -> Self {
        Self {
            complex: ComplexType::new(name),
            key: None,
            navigation_properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.complex.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.complex.properties
    }

    /// Add a property.
    pub fn with_property(mut self, property: Property) -> Self {
        self.complex.properties.push(property);
        self
    }

    /// Add multiple properties.
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.complex.properties.extend(properties);
        self
    }

    /// Add a navigation property.
    pub fn with_navigation_property(mut self, navigation: NavigationProperty) -> Self {
        self.navigation_properties.push(navigation);
        self
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.complex.base_type = Some(base_type.into());
        self
    }

    /// Get a structural property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.complex.property(name)
    }

    /// Get a navigation property by name.
    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|n| n.name == name)
    }

    /// First key property name, if the type declares a key.
    pub fn key_property(&self) -> Option<&str> {
        self.key
            .as_ref()
            .and_then(|k| k.property_refs.first())
            .map(String::as_str)
    }
}
