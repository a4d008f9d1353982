//! Documentation-side collaborators.
//!
//! A [`DocSet`] is the parsed documentation: resources with their key and
//! properties. [`ResourceGraphBuilder`] turns it into a
//! metadata graph and [`DocSetExampleChecker`] checks generated examples
//! against it.

use super::resources::ResourceMetadata;
use crate::config::ValidationOptions;
use crate::error::Result;
use crate::identifier::{has_namespace, namespace_of, qualify, type_name_of};
use crate::model::{ComplexType, EntityFramework, EntityType, ParameterDataType, Property, Schema};
use crate::validation::{ValidationError, ValidationErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A documented property of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentedProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: ParameterDataType,
    #[serde(default)]
    pub description: Option<String>,
}

impl DocumentedProperty {
    pub fn new(name: impl Into<String>, data_type: ParameterDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A resource as the documentation describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentedResource {
    /// Qualified name, e.g. `graph.driveItem`.
    pub name: String,
    /// Documented key; resources with a key become entity types.
    #[serde(default)]
    pub key_property: Option<String>,
    #[serde(default)]
    pub properties: Vec<DocumentedProperty>,
}

impl DocumentedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_property: None,
            properties: Vec::new(),
        }
    }

    pub fn with_key(mut self, key_property: impl Into<String>) -> Self {
        self.key_property = Some(key_property.into());
        self
    }

    pub fn with_property(mut self, property: DocumentedProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&DocumentedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Namespace part of the resource name.
    pub fn namespace(&self) -> Result<&str> {
        namespace_of(&self.name)
    }
}

/// The parsed documentation set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocSet {
    #[serde(default)]
    pub resources: Vec<DocumentedResource>,
}

impl DocSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: DocumentedResource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Look up a documented resource by exact qualified name.
    pub fn resource(&self, name: &str) -> Option<&DocumentedResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Builds a metadata graph from documentation.
pub trait GraphBuilder {
    /// Build the graph described by `docs`.
    ///
    /// `namespaces`, when given, limits the output to resources in those
    /// namespaces.
    fn generate(
        &self,
        docs: &DocSet,
        base_url: Option<&str>,
        namespaces: Option<&[String]>,
    ) -> Result<EntityFramework>;
}

/// Checks a generated example against documented resources.
pub trait ExampleChecker {
    /// Return every problem found in `example_text`, empty when valid.
    fn validate(
        &self,
        metadata: &ResourceMetadata,
        example_text: &str,
        options: &ValidationOptions,
    ) -> Vec<ValidationError>;
}

/// Default [`GraphBuilder`]: one schema per documented namespace.
///
/// Resources with a key property become entity types, the rest complex
/// types. Unqualified custom property types are qualified with the
/// resource's own namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceGraphBuilder;

impl ResourceGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    fn property_for(namespace: &str, documented: &DocumentedProperty) -> Result<Property> {
        let mut data_type = documented.data_type.clone();
        if let Some(custom) = data_type.custom_type_name.as_mut() {
            if !custom.is_empty() && !has_namespace(custom) {
                *custom = qualify(namespace, custom);
            }
        }

        let mut property = Property::new(&documented.name, data_type.to_wire_name(None)?);
        property.description = documented.description.clone();
        Ok(property)
    }
}

impl GraphBuilder for ResourceGraphBuilder {
    fn generate(
        &self,
        docs: &DocSet,
        base_url: Option<&str>,
        namespaces: Option<&[String]>,
    ) -> Result<EntityFramework> {
        debug!(
            resources = docs.resources.len(),
            base_url = base_url.unwrap_or(""),
            "Building graph from documentation"
        );

        let mut graph = EntityFramework::new();

        for resource in &docs.resources {
            let namespace = resource.namespace()?;
            if let Some(filter) = namespaces {
                if !filter.iter().any(|ns| ns == namespace) {
                    continue;
                }
            }

            let properties = resource
                .properties
                .iter()
                .map(|p| Self::property_for(namespace, p))
                .collect::<Result<Vec<_>>>()?;

            let index = match graph.schemas.iter().position(|s| s.namespace == namespace) {
                Some(index) => index,
                None => {
                    graph.schemas.push(Schema::new(namespace));
                    graph.schemas.len() - 1
                }
            };
            let schema = &mut graph.schemas[index];

            let type_name = type_name_of(&resource.name);
            match &resource.key_property {
                Some(key) => schema
                    .entity_types
                    .push(EntityType::new(type_name, key).with_properties(properties)),
                None => schema
                    .complex_types
                    .push(ComplexType::new(type_name).with_properties(properties)),
            }
        }

        Ok(graph)
    }
}

/// Default [`ExampleChecker`] backed by a [`DocSet`].
#[derive(Debug, Clone, Copy)]
pub struct DocSetExampleChecker<'a> {
    docs: &'a DocSet,
}

impl<'a> DocSetExampleChecker<'a> {
    pub fn new(docs: &'a DocSet) -> Self {
        Self { docs }
    }
}

impl ExampleChecker for DocSetExampleChecker<'_> {
    fn validate(
        &self,
        metadata: &ResourceMetadata,
        example_text: &str,
        options: &ValidationOptions,
    ) -> Vec<ValidationError> {
        let context = Some(metadata.resource_type.as_str());

        let example: Value = match serde_json::from_str(example_text) {
            Ok(value) => value,
            Err(e) => {
                return vec![ValidationError::new(
                    ValidationErrorCode::InvalidJson,
                    context,
                    format!("Example is not valid JSON: {e}"),
                )]
            }
        };
        let Some(object) = example.as_object() else {
            return vec![ValidationError::new(
                ValidationErrorCode::InvalidJson,
                context,
                "Example is not a JSON object.",
            )];
        };

        let Some(documented) = self.docs.resource(&metadata.resource_type) else {
            return vec![ValidationError::new(
                ValidationErrorCode::ResourceTypeNotFound,
                context,
                format!("Resource type {} is not documented.", metadata.resource_type),
            )];
        };

        let mut errors = Vec::new();

        // Annotations such as `@odata.type` are never documented properties.
        for key in object.keys().filter(|k| !k.starts_with('@')) {
            if documented.property(key).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorCode::AdditionalPropertyDetected,
                    context,
                    format!("Undocumented property '{key}' detected."),
                ));
            }
        }

        if !options.ignore_missing_properties && !options.allow_truncated_responses {
            for property in &documented.properties {
                let checked = options.required_properties.is_empty()
                    || options.required_properties.contains(&property.name);
                if checked && !object.contains_key(&property.name) {
                    errors.push(ValidationError::new(
                        ValidationErrorCode::MissingRequiredProperty,
                        context,
                        format!("Missing required property '{}'.", property.name),
                    ));
                }
            }
        }

        errors
    }
}
