//! Reverse resolution: from graph nodes back to identifiers.

use crate::error::{Error, Result};
use crate::identifier::{has_namespace, qualify, wrap_collection};
use crate::model::EntityFramework;
use crate::navigation::Navigable;

impl EntityFramework {
    /// Compute the canonical identifier of `node`.
    ///
    /// Complex and entity types are matched by identity against the members
    /// each schema owns; a node no schema owns yields `Ok(None)`.
    pub fn identifier_for(&self, node: &Navigable<'_>) -> Result<Option<String>> {
        match *node {
            Navigable::Simple(simple) => Ok(Some(simple.wire_name()?.to_string())),
            Navigable::Collection(inner) => Ok(Some(wrap_collection(inner))),
            Navigable::Singleton(singleton) => Ok(Some(singleton.type_identifier.clone())),
            Navigable::EntitySet(entity_set) => Ok(Some(wrap_collection(&entity_set.entity_type))),
            Navigable::ComplexType(complex) => Ok(self.schemas.iter().find_map(|schema| {
                schema
                    .complex_types
                    .iter()
                    .find(|candidate| std::ptr::eq(*candidate, complex))
                    .map(|c| qualify(&schema.namespace, &c.name))
            })),
            Navigable::EntityType(entity) => Ok(self.schemas.iter().find_map(|schema| {
                schema
                    .entity_types
                    .iter()
                    .find(|candidate| std::ptr::eq(*candidate, entity))
                    .map(|e| qualify(&schema.namespace, e.name()))
            })),
            Navigable::EnumType(_) | Navigable::Action(_) | Navigable::Function(_) => {
                Err(Error::UnsupportedNodeKind { kind: node.kind() })
            }
        }
    }
}

/// Qualify a custom type name with the namespace of the schema declaring it.
///
/// Names that already carry a namespace are returned unchanged, as are names
/// no schema declares. The type search ignores ASCII case.
pub fn resolve_resource_name(name: &str, graph: &EntityFramework) -> Result<String> {
    if name.is_empty() {
        return Err(Error::InvalidCustomType(
            "type parameter does not contain a valid custom type reference".to_string(),
        ));
    }

    if has_namespace(name) {
        return Ok(name.to_string());
    }

    let qualified = graph.schemas.iter().find_map(|schema| {
        schema
            .find_resource_type_with_name(name, true)
            .map(|declared| qualify(&schema.namespace, declared))
    });

    Ok(qualified.unwrap_or_else(|| name.to_string()))
}
