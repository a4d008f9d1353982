//! Navigation engine.
//!
//! Resolves type identifiers and path components to nodes of the metadata
//! graph. Nodes are borrowed from the graph; collection targets stay as
//! unresolved identifiers until something navigates into them.

use crate::error::{Error, Result};
use crate::identifier::{namespace_of, type_name_of, unwrap_collection};
use crate::model::{
    ComplexType, EntityFramework, EntitySet, EntityType, EnumType, Operation, Property,
    SimpleDataType, Singleton,
};
use tracing::debug;

/// Component name used in errors for key-based navigation.
const KEY_COMPONENT: &str = "{key}";

/// A node reachable by path component or type identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Navigable<'g> {
    /// A primitive type.
    Simple(SimpleDataType),
    /// A collection of the (unresolved) element identifier.
    Collection(&'g str),
    Singleton(&'g Singleton),
    EntitySet(&'g EntitySet),
    ComplexType(&'g ComplexType),
    EntityType(&'g EntityType),
    EnumType(&'g EnumType),
    Action(&'g Operation),
    Function(&'g Operation),
}

impl<'g> Navigable<'g> {
    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Navigable::Simple(_) => "SimpleType",
            Navigable::Collection(_) => "Collection",
            Navigable::Singleton(_) => "Singleton",
            Navigable::EntitySet(_) => "EntitySet",
            Navigable::ComplexType(_) => "ComplexType",
            Navigable::EntityType(_) => "EntityType",
            Navigable::EnumType(_) => "EnumType",
            Navigable::Action(_) => "Action",
            Navigable::Function(_) => "Function",
        }
    }

    fn describe(&self) -> String {
        match self {
            Navigable::Simple(simple) => format!("simple type {simple:?}"),
            Navigable::Collection(inner) => format!("Collection({inner})"),
            Navigable::Singleton(s) => format!("singleton '{}'", s.name),
            Navigable::EntitySet(s) => format!("entity set '{}'", s.name),
            Navigable::ComplexType(c) => format!("complex type '{}'", c.name),
            Navigable::EntityType(e) => format!("entity type '{}'", e.name()),
            Navigable::EnumType(e) => format!("enum type '{}'", e.name),
            Navigable::Action(a) => format!("action '{}'", a.name),
            Navigable::Function(f) => format!("function '{}'", f.name),
        }
    }

    fn not_found(&self, component: &str) -> Error {
        Error::NavigationNotFound {
            component: component.to_string(),
            node: self.describe(),
        }
    }

    /// Return the node reachable from this one by `component`.
    pub fn navigate(&self, component: &str, graph: &'g EntityFramework) -> Result<Navigable<'g>> {
        match *self {
            Navigable::Simple(_)
            | Navigable::EnumType(_)
            | Navigable::Action(_)
            | Navigable::Function(_) => Err(self.not_found(component)),
            // A component below a collection addresses one instance by key.
            Navigable::Collection(_) | Navigable::EntitySet(_) => self.navigate_by_key(graph),
            Navigable::Singleton(singleton) => {
                graph
                    .resolve_identifier(&singleton.type_identifier)?
                    .navigate(component, graph)
            }
            Navigable::ComplexType(complex) => {
                navigate_properties(&complex.properties, component, graph)
                    .unwrap_or_else(|| Err(self.not_found(component)))
            }
            Navigable::EntityType(entity) => {
                if let Some(navigation) = entity.navigation_property(component) {
                    return navigation_target(&navigation.type_identifier, graph);
                }
                navigate_properties(entity.properties(), component, graph)
                    .unwrap_or_else(|| Err(self.not_found(component)))
            }
        }
    }

    /// Navigate to a single instance by its key.
    ///
    /// Declared for entity types, entity sets and collections but not
    /// implemented; callers must not rely on it.
    pub fn navigate_by_key(&self, _graph: &'g EntityFramework) -> Result<Navigable<'g>> {
        match self {
            Navigable::EntityType(_) | Navigable::EntitySet(_) | Navigable::Collection(_) => {
                Err(Error::NotImplemented(format!(
                    "key-based navigation of {}",
                    self.describe()
                )))
            }
            _ => Err(self.not_found(KEY_COMPONENT)),
        }
    }
}

/// Look `component` up among structural properties.
fn navigate_properties<'g>(
    properties: &'g [Property],
    component: &str,
    graph: &'g EntityFramework,
) -> Option<Result<Navigable<'g>>> {
    properties
        .iter()
        .find(|p| p.name == component)
        .map(|p| navigation_target(&p.type_identifier, graph))
}

/// Collection targets stay lazy; anything else is resolved now.
fn navigation_target<'g>(identifier: &'g str, graph: &'g EntityFramework) -> Result<Navigable<'g>> {
    match unwrap_collection(identifier) {
        Some(inner) => Ok(Navigable::Collection(inner)),
        None => graph.resolve_identifier(identifier),
    }
}

impl EntityFramework {
    /// Find the member declared by `identifier`.
    ///
    /// Schemas are scanned in declaration order; within a schema complex
    /// types win over entity types, then actions, then functions.
    pub fn find_type_with_identifier(&self, identifier: &str) -> Result<Option<Navigable<'_>>> {
        let namespace = namespace_of(identifier)?;
        let name = type_name_of(identifier);

        for schema in self.schemas_in(namespace) {
            if let Some(complex) = schema.complex_type(name) {
                return Ok(Some(Navigable::ComplexType(complex)));
            }
            if let Some(entity) = schema.entity_type(name) {
                return Ok(Some(Navigable::EntityType(entity)));
            }
            if let Some(action) = schema.action(name) {
                return Ok(Some(Navigable::Action(action)));
            }
            if let Some(function) = schema.function(name) {
                return Ok(Some(Navigable::Function(function)));
            }
        }

        Ok(None)
    }

    /// Resolve an identifier to a graph member or simple type.
    ///
    /// `Collection(...)` identifiers resolve to a collection node once the
    /// element identifier itself resolves.
    pub fn resolve_identifier<'g>(&'g self, identifier: &'g str) -> Result<Navigable<'g>> {
        if let Some(inner) = unwrap_collection(identifier) {
            self.resolve_identifier(inner)?;
            return Ok(Navigable::Collection(inner));
        }

        if let Some(found) = self.find_type_with_identifier(identifier)? {
            return Ok(found);
        }

        match SimpleDataType::from_wire_name(identifier) {
            SimpleDataType::Object => {
                debug!(identifier, "Type identifier did not resolve");
                Err(Error::UnresolvedTypeIdentifier {
                    identifier: identifier.to_string(),
                })
            }
            simple => Ok(Navigable::Simple(simple)),
        }
    }

    /// Look up an entity type by identifier.
    pub fn entity_type_with_identifier(&self, identifier: &str) -> Result<&EntityType> {
        match self.find_type_with_identifier(identifier)? {
            Some(Navigable::EntityType(entity)) => Ok(entity),
            _ => Err(type_mismatch(identifier, "EntityType")),
        }
    }

    /// Look up a complex type by identifier.
    pub fn complex_type_with_identifier(&self, identifier: &str) -> Result<&ComplexType> {
        match self.find_type_with_identifier(identifier)? {
            Some(Navigable::ComplexType(complex)) => Ok(complex),
            _ => Err(type_mismatch(identifier, "ComplexType")),
        }
    }

    /// Look up an action by identifier.
    pub fn action_with_identifier(&self, identifier: &str) -> Result<&Operation> {
        match self.find_type_with_identifier(identifier)? {
            Some(Navigable::Action(action)) => Ok(action),
            _ => Err(type_mismatch(identifier, "Action")),
        }
    }

    /// Look up a function by identifier.
    pub fn function_with_identifier(&self, identifier: &str) -> Result<&Operation> {
        match self.find_type_with_identifier(identifier)? {
            Some(Navigable::Function(function)) => Ok(function),
            _ => Err(type_mismatch(identifier, "Function")),
        }
    }

    /// Resolve the first segment of a service path against every schema's
    /// entity container.
    pub fn navigate_root(&self, component: &str) -> Result<Navigable<'_>> {
        for schema in &self.schemas {
            if let Some(singleton) = schema.singleton(component) {
                return Ok(Navigable::Singleton(singleton));
            }
            if let Some(entity_set) = schema.entity_set(component) {
                return Ok(Navigable::EntitySet(entity_set));
            }
        }

        Err(Error::NavigationNotFound {
            component: component.to_string(),
            node: "entity container".to_string(),
        })
    }

    /// Walk a `/`-separated service path, e.g. `/drive/root/children`.
    pub fn navigate_path(&self, path: &str) -> Result<Navigable<'_>> {
        let mut components = path.split('/').filter(|c| !c.is_empty());
        let first = components.next().ok_or_else(|| Error::NavigationNotFound {
            component: path.to_string(),
            node: "entity container".to_string(),
        })?;

        let mut current = self.navigate_root(first)?;
        for component in components {
            current = current.navigate(component, self)?;
        }
        Ok(current)
    }
}

fn type_mismatch(identifier: &str, expected: &'static str) -> Error {
    Error::TypeMismatch {
        identifier: identifier.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityContainer, NavigationProperty, Schema};

    fn sample_graph() -> EntityFramework {
        EntityFramework::new()
            .with_schema(
                Schema::new("graph")
                    .with_entity_type(
                        EntityType::new("item", "id")
                            .with_property(Property::new("id", "Edm.String").required())
                            .with_property(Property::new("size", "Edm.Int64"))
                            .with_property(Property::new("parentReference", "graph.itemReference"))
                            .with_property(Property::new("thumbnails", "Collection(graph.thumbnail)"))
                            .with_property(Property::new("broken", "graph.missing"))
                            .with_navigation_property(NavigationProperty::new(
                                "children",
                                "Collection(graph.item)",
                            ))
                            .with_navigation_property(NavigationProperty::new(
                                "parent",
                                "graph.item",
                            )),
                    )
                    .with_entity_type(
                        EntityType::new("drive", "id")
                            .with_navigation_property(NavigationProperty::new("root", "graph.item")),
                    )
                    .with_entity_type(EntityType::new("folder", "id"))
                    .with_complex_type(
                        ComplexType::new("itemReference")
                            .with_property(Property::new("driveId", "Edm.String")),
                    )
                    .with_complex_type(ComplexType::new("thumbnail"))
                    .with_complex_type(ComplexType::new("shadowed"))
                    .with_entity_type(EntityType::new("shadowed", "id"))
                    .with_enum_type(EnumType::new("status").with_member("active", "0"))
                    .with_action(Operation::bound("copy", "graph.item"))
                    .with_function(Operation::bound("delta", "graph.item"))
                    .with_entity_container(
                        EntityContainer::new("GraphService")
                            .with_singleton("drive", "graph.drive")
                            .with_entity_set("drives", "graph.drive"),
                    ),
            )
            .with_schema(Schema::new("other").with_entity_type(EntityType::new("item", "id")))
    }

    #[test]
    fn test_resolve_entity_type() {
        let graph = sample_graph();
        let node = graph.resolve_identifier("graph.folder").unwrap();

        match node {
            Navigable::EntityType(entity) => {
                assert_eq!(entity.name(), "folder");
                assert!(std::ptr::eq(entity, graph.schemas[0].entity_type("folder").unwrap()));
            }
            other => panic!("Expected EntityType, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_type_fails() {
        let graph = sample_graph();
        let err = graph.resolve_identifier("graph.missingType").unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedTypeIdentifier { identifier } if identifier == "graph.missingType"
        ));
    }

    #[test]
    fn test_resolve_simple_type_fallback() {
        let graph = sample_graph();

        assert_eq!(
            graph.resolve_identifier("Edm.String").unwrap(),
            Navigable::Simple(SimpleDataType::String)
        );
        // Object is the unresolved case, not a valid resolution.
        assert!(graph.resolve_identifier("Edm.Object").is_err());
    }

    #[test]
    fn test_resolve_without_namespace_is_malformed() {
        let graph = sample_graph();
        let err = graph.resolve_identifier("item").unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_resolution_precedence() {
        let graph = sample_graph();

        // Complex types win over entity types with the same name.
        let node = graph.resolve_identifier("graph.shadowed").unwrap();
        assert_eq!(node.kind(), "ComplexType");

        assert_eq!(graph.resolve_identifier("graph.copy").unwrap().kind(), "Action");
        assert_eq!(graph.resolve_identifier("graph.delta").unwrap().kind(), "Function");
    }

    #[test]
    fn test_resolution_scans_schemas_in_order() {
        let graph = sample_graph();

        let node = graph.resolve_identifier("other.item").unwrap();
        match node {
            Navigable::EntityType(entity) => {
                assert!(std::ptr::eq(entity, &graph.schemas[1].entity_types[0]));
            }
            other => panic!("Expected EntityType, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_collection_identifier() {
        let graph = sample_graph();

        assert_eq!(
            graph.resolve_identifier("Collection(graph.item)").unwrap(),
            Navigable::Collection("graph.item")
        );
        assert!(graph.resolve_identifier("Collection(graph.nothing)").is_err());
    }

    #[test]
    fn test_navigation_property_collection_is_lazy() {
        let graph = sample_graph();
        let item = graph.resolve_identifier("graph.item").unwrap();

        let children = item.navigate("children", &graph).unwrap();
        assert_eq!(children, Navigable::Collection("graph.item"));
    }

    #[test]
    fn test_navigation_property_single_is_eager() {
        let graph = sample_graph();
        let item = graph.resolve_identifier("graph.item").unwrap();

        let parent = item.navigate("parent", &graph).unwrap();
        assert_eq!(parent.kind(), "EntityType");
    }

    #[test]
    fn test_navigation_falls_back_to_properties() {
        let graph = sample_graph();
        let item = graph.resolve_identifier("graph.item").unwrap();

        assert_eq!(
            item.navigate("size", &graph).unwrap(),
            Navigable::Simple(SimpleDataType::Int64)
        );
        assert_eq!(item.navigate("parentReference", &graph).unwrap().kind(), "ComplexType");
        assert_eq!(
            item.navigate("thumbnails", &graph).unwrap(),
            Navigable::Collection("graph.thumbnail")
        );

        let err = item.navigate("nothing", &graph).unwrap_err();
        assert!(matches!(err, Error::NavigationNotFound { component, .. } if component == "nothing"));

        let err = item.navigate("broken", &graph).unwrap_err();
        assert!(matches!(err, Error::UnresolvedTypeIdentifier { .. }));
    }

    #[test]
    fn test_complex_type_navigation() {
        let graph = sample_graph();
        let reference = graph.resolve_identifier("graph.itemReference").unwrap();

        assert_eq!(
            reference.navigate("driveId", &graph).unwrap(),
            Navigable::Simple(SimpleDataType::String)
        );
        assert!(reference.navigate("children", &graph).is_err());
    }

    #[test]
    fn test_leaf_nodes_have_no_members() {
        let graph = sample_graph();
        let status = Navigable::EnumType(graph.schemas[0].enum_type("status").unwrap());

        for node in [Navigable::Simple(SimpleDataType::String), status] {
            let err = node.navigate("anything", &graph).unwrap_err();
            assert!(matches!(err, Error::NavigationNotFound { .. }));
        }
    }

    #[test]
    fn test_key_navigation_not_implemented() {
        let graph = sample_graph();
        let item = graph.resolve_identifier("graph.item").unwrap();

        assert!(matches!(item.navigate_by_key(&graph), Err(Error::NotImplemented(_))));

        let children = item.navigate("children", &graph).unwrap();
        assert!(matches!(children.navigate("1234", &graph), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_navigate_path_through_singleton() {
        let graph = sample_graph();

        let node = graph.navigate_path("/drive/root/children").unwrap();
        assert_eq!(node, Navigable::Collection("graph.item"));

        let node = graph.navigate_path("/drive/root/parentReference/driveId").unwrap();
        assert_eq!(node, Navigable::Simple(SimpleDataType::String));
    }

    #[test]
    fn test_navigate_path_errors() {
        let graph = sample_graph();

        assert!(matches!(graph.navigate_path("/nowhere"), Err(Error::NavigationNotFound { .. })));
        assert!(matches!(graph.navigate_path("/"), Err(Error::NavigationNotFound { .. })));
        assert!(matches!(graph.navigate_path("/drives/abc"), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_typed_lookups() {
        let graph = sample_graph();

        assert_eq!(graph.entity_type_with_identifier("graph.item").unwrap().name(), "item");
        assert_eq!(
            graph.complex_type_with_identifier("graph.itemReference").unwrap().name,
            "itemReference"
        );
        assert_eq!(graph.action_with_identifier("graph.copy").unwrap().name, "copy");
        assert_eq!(graph.function_with_identifier("graph.delta").unwrap().name, "delta");

        let err = graph.entity_type_with_identifier("graph.itemReference").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { expected: "EntityType", .. }));

        let err = graph.complex_type_with_identifier("graph.nothing").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
