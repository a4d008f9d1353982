//! Resource definitions generated from a metadata graph.

use crate::error::{Error, Result};
use crate::identifier::{namespace_of, type_name_of, unwrap_collection};
use crate::model::{EntityFramework, EnumType, Property, SimpleDataType};
use crate::navigation::Navigable;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Nesting depth past which example objects and arrays are left empty.
const MAX_EXAMPLE_DEPTH: usize = 3;

const EDM_PREFIX: &str = "Edm.";

/// Declared shape of a resource, handed to example checkers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Qualified resource type, e.g. `graph.driveItem`.
    pub resource_type: String,
    /// Key property for entity types.
    pub key_property: Option<String>,
    /// Names of nullable properties.
    pub optional_properties: Vec<String>,
    /// Structural properties in declaration order.
    pub properties: Vec<Property>,
}

/// A resource type of the graph with its generated example payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    /// Qualified identifier of the type.
    pub name: String,
    pub metadata: ResourceMetadata,
    /// Pretty-printed JSON object with one placeholder value per property.
    pub example_text: String,
    /// Problems found while generating the example.
    pub generation_errors: Vec<ValidationError>,
}

/// Generate one resource definition per entity and complex type.
///
/// Schemas are visited in declaration order; within a schema, entity types
/// come before complex types. A property that fails to resolve becomes a
/// `null` in the example and an entry in `generation_errors`.
pub fn generate_resources(graph: &EntityFramework) -> Vec<ResourceDefinition> {
    let mut resources = Vec::new();

    for schema in &graph.schemas {
        let entities = schema.entity_types.iter().map(|e| {
            (
                Navigable::EntityType(e),
                e.properties(),
                e.key_property().map(str::to_string),
            )
        });
        let complexes = schema
            .complex_types
            .iter()
            .map(|c| (Navigable::ComplexType(c), c.properties.as_slice(), None));

        for (node, properties, key_property) in entities.chain(complexes) {
            let name = match graph.identifier_for(&node) {
                Ok(Some(name)) => name,
                Ok(None) => {
                    warn!(kind = node.kind(), "Skipping resource owned by no schema");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Skipping resource without identifier");
                    continue;
                }
            };

            let mut generation_errors = Vec::new();
            let mut example = Map::new();
            for property in properties {
                let value = property_value(graph, &node, property, 0).unwrap_or_else(|e| {
                    debug!(
                        resource = %name,
                        property = %property.name,
                        error = %e,
                        "Example value unresolved"
                    );
                    generation_errors.push(e.into_validation_error(Some(&name)));
                    Value::Null
                });
                example.insert(property.name.clone(), value);
            }

            let example_text =
                serde_json::to_string_pretty(&Value::Object(example)).unwrap_or_default();

            resources.push(ResourceDefinition {
                metadata: ResourceMetadata {
                    resource_type: name.clone(),
                    key_property,
                    optional_properties: properties
                        .iter()
                        .filter(|p| p.nullable)
                        .map(|p| p.name.clone())
                        .collect(),
                    properties: properties.to_vec(),
                },
                name,
                example_text,
                generation_errors,
            });
        }
    }

    resources
}

/// Placeholder value for `property` of `owner`.
///
/// Enum-typed properties are looked up directly since identifier
/// resolution does not cover enum types. `Edm.` primitives missing from the
/// simple type table are treated as untyped objects.
fn property_value(
    graph: &EntityFramework,
    owner: &Navigable<'_>,
    property: &Property,
    depth: usize,
) -> Result<Value> {
    if let Some(enum_type) = find_enum(graph, &property.type_identifier) {
        return Ok(enum_value(enum_type));
    }
    if is_untyped_primitive(graph, &property.type_identifier) {
        return Ok(simple_value(SimpleDataType::Object));
    }
    let node = owner.navigate(&property.name, graph)?;
    sample_value(graph, node, depth)
}

fn sample_value(graph: &EntityFramework, node: Navigable<'_>, depth: usize) -> Result<Value> {
    let value = match node {
        Navigable::Simple(simple) => simple_value(simple),
        Navigable::EnumType(enum_type) => enum_value(enum_type),
        Navigable::Collection(inner) => {
            if depth >= MAX_EXAMPLE_DEPTH {
                return Ok(json!([]));
            }
            let element = match find_enum(graph, inner) {
                Some(enum_type) => enum_value(enum_type),
                None if is_untyped_primitive(graph, inner) => simple_value(SimpleDataType::Object),
                None => sample_value(graph, graph.resolve_identifier(inner)?, depth + 1)?,
            };
            json!([element])
        }
        Navigable::ComplexType(complex) => {
            structured_value(graph, &node, &complex.properties, depth)?
        }
        Navigable::EntityType(entity) => {
            structured_value(graph, &node, entity.properties(), depth)?
        }
        Navigable::Singleton(_)
        | Navigable::EntitySet(_)
        | Navigable::Action(_)
        | Navigable::Function(_) => Value::Null,
    };
    Ok(value)
}

fn structured_value(
    graph: &EntityFramework,
    node: &Navigable<'_>,
    properties: &[Property],
    depth: usize,
) -> Result<Value> {
    let mut object = Map::new();
    if depth < MAX_EXAMPLE_DEPTH {
        for property in properties {
            object.insert(
                property.name.clone(),
                property_value(graph, node, property, depth + 1)?,
            );
        }
    }
    Ok(Value::Object(object))
}

fn simple_value(simple: SimpleDataType) -> Value {
    match simple {
        SimpleDataType::String => json!("string"),
        SimpleDataType::Int32 | SimpleDataType::Int64 => json!(1024),
        SimpleDataType::Boolean => json!(false),
        SimpleDataType::DateTimeOffset => json!("2015-01-01T00:00:00Z"),
        SimpleDataType::Double | SimpleDataType::Float => json!(1.5),
        SimpleDataType::Guid => json!("00000000-0000-0000-0000-000000000000"),
        SimpleDataType::TimeSpan => json!("PT0S"),
        SimpleDataType::Stream => json!("stream"),
        SimpleDataType::Object => json!({}),
        SimpleDataType::Collection => json!([]),
    }
}

fn enum_value(enum_type: &EnumType) -> Value {
    enum_type
        .members
        .first()
        .map(|m| json!(m.name))
        .unwrap_or_else(|| json!(""))
}

/// An `Edm.` identifier that maps to `Object` and names no declared member,
/// e.g. `Edm.Object` or `Edm.Decimal`.
fn is_untyped_primitive(graph: &EntityFramework, identifier: &str) -> bool {
    identifier.starts_with(EDM_PREFIX)
        && SimpleDataType::from_wire_name(identifier).is_object()
        && !matches!(graph.find_type_with_identifier(identifier), Ok(Some(_)))
}

fn find_enum<'g>(graph: &'g EntityFramework, identifier: &str) -> Option<&'g EnumType> {
    if unwrap_collection(identifier).is_some() {
        return None;
    }
    let namespace = namespace_of(identifier).ok()?;
    let name = type_name_of(identifier);
    graph
        .schemas_in(namespace)
        .find_map(|schema| schema.enum_type(name))
}

impl ResourceDefinition {
    /// Parse the generated example back into JSON.
    pub fn example(&self) -> Result<Value> {
        serde_json::from_str(&self.example_text).map_err(Error::from)
    }
}
