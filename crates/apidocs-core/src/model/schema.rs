//! Schema - a namespace and the members declared in it.

use super::{ComplexType, EntityContainer, EntitySet, EntityType, EnumType, Operation, Singleton};
use serde::{Deserialize, Serialize};

/// A namespace-scoped set of type and operation declarations.
///
/// Member names are unique per collection, not across collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Namespace, e.g. `microsoft.graph`.
    pub namespace: String,
    /// Entity types in declaration order.
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    /// Complex types in declaration order.
    #[serde(default)]
    pub complex_types: Vec<ComplexType>,
    /// Enum types in declaration order.
    #[serde(default)]
    pub enum_types: Vec<EnumType>,
    /// Actions in declaration order.
    #[serde(default)]
    pub actions: Vec<Operation>,
    /// Functions in declaration order.
    #[serde(default)]
    pub functions: Vec<Operation>,
    /// Entity container, if the schema declares one.
    #[serde(default)]
    pub entity_container: Option<EntityContainer>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entity_types: Vec::new(),
            complex_types: Vec::new(),
            enum_types: Vec::new(),
            actions: Vec::new(),
            functions: Vec::new(),
            entity_container: None,
        }
    }

    /// Add an entity type.
    pub fn with_entity_type(mut self, entity: EntityType) -> Self {
        self.entity_types.push(entity);
        self
    }

    /// Add a complex type.
    pub fn with_complex_type(mut self, complex: ComplexType) -> Self {
        self.complex_types.push(complex);
        self
    }

    /// Add an enum type.
    pub fn with_enum_type(mut self, enum_type: EnumType) -> Self {
        self.enum_types.push(enum_type);
        self
    }

    /// Add an action.
    pub fn with_action(mut self, action: Operation) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a function.
    pub fn with_function(mut self, function: Operation) -> Self {
        self.functions.push(function);
        self
    }

    /// Set the entity container.
    pub fn with_entity_container(mut self, container: EntityContainer) -> Self {
        self.entity_container = Some(container);
        self
    }

    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name() == name)
    }

    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|c| c.name == name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|e| e.name == name)
    }

    pub fn action(&self, name: &str) -> Option<&Operation> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&Operation> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_container.as_ref()?.entity_set(name)
    }

    pub fn singleton(&self, name: &str) -> Option<&Singleton> {
        self.entity_container.as_ref()?.singleton(name)
    }

    /// Find an entity or complex type by name, returning its declared name.
    ///
    /// Complex types are searched first, then entity types.
    pub fn find_resource_type_with_name(&self, name: &str, case_insensitive: bool) -> Option<&str> {
        let matches = |candidate: &str| {
            if case_insensitive {
                candidate.eq_ignore_ascii_case(name)
            } else {
                candidate == name
            }
        };

        self.complex_types
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.entity_types.iter().map(|e| e.name()))
            .find(|candidate| matches(*candidate))
    }

    /// Total number of declared members across all collections.
    pub fn member_count(&self) -> usize {
        self.entity_types.len()
            + self.complex_types.len()
            + self.enum_types.len()
            + self.actions.len()
            + self.functions.len()
    }
}
