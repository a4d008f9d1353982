//! Metadata graph comparison.
//!
//! Compares a `source` graph (treated as the truth) with a `remote` graph
//! and reports every remote schema that has no equivalent in the source.
//! Namespace equivalence follows the alias table of [`ComparerConfig`].
//!
//! When member comparison is enabled, matched schemas are also diffed
//! type by type: missing types, missing properties and properties whose
//! types disagree are reported, grouped per type and per schema.

use crate::config::ComparerConfig;
use crate::identifier::{has_namespace, namespace_of, qualify, type_name_of, unwrap_collection};
use crate::model::{EntityFramework, NavigationProperty, Property, Schema};
use crate::validation::{ValidationError, ValidationErrorCode};
use tracing::{debug, info, warn};

/// Context attached to errors about the remote graph.
pub const REMOTE_CONTEXT: &str = "remote";

/// Compares two metadata graphs and reports their differences.
#[derive(Debug, Clone, Default)]
pub struct CsdlComparer {
    config: ComparerConfig,
}

impl CsdlComparer {
    /// Create a comparer with the given configuration.
    pub fn new(config: ComparerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparerConfig {
        &self.config
    }

    /// Compare `remote` against `source`.
    ///
    /// Returns one top-level error per remote schema that is missing from
    /// the source or differs from it, in remote schema order.
    pub fn compare_frameworks(
        &self,
        source: &EntityFramework,
        remote: &EntityFramework,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for remote_schema in &remote.schemas {
            match self.find_matching_schema(&remote_schema.namespace, &source.schemas) {
                None => {
                    warn!(
                        namespace = %remote_schema.namespace,
                        "Remote schema has no equivalent in source"
                    );
                    errors.push(ValidationError::new(
                        ValidationErrorCode::ResourceTypeNotFound,
                        Some(REMOTE_CONTEXT),
                        format!(
                            "Remote schema namespace '{}' not found in source.",
                            remote_schema.namespace
                        ),
                    ));
                }
                Some(source_schema) => {
                    let detected = self.compare_schemas(source_schema, remote_schema);
                    debug!(
                        source = %source_schema.namespace,
                        remote = %remote_schema.namespace,
                        differences = detected.len(),
                        "Compared schemas"
                    );
                    if !detected.is_empty() {
                        errors.push(ValidationError::consolidated(
                            detected,
                            format!(
                                "Schema {} had changes from the source.",
                                remote_schema.namespace
                            ),
                        ));
                    }
                }
            }
        }

        info!(
            remote_schemas = remote.schemas.len(),
            errors = errors.len(),
            "Framework comparison completed"
        );

        errors
    }

    /// Compare the members of two matched schemas.
    fn compare_schemas(&self, source: &Schema, remote: &Schema) -> Vec<ValidationError> {
        if !self.config.compare_members {
            return Vec::new();
        }

        let mut errors = Vec::new();

        let source_entities: Vec<_> = source.entity_types.iter().map(|e| e.name()).collect();
        let remote_entities: Vec<_> = remote.entity_types.iter().map(|e| e.name()).collect();
        diff_names("entity type", &source_entities, &remote_entities, remote, &mut errors);

        let source_complex: Vec<_> = source.complex_types.iter().map(|c| c.name.as_str()).collect();
        let remote_complex: Vec<_> = remote.complex_types.iter().map(|c| c.name.as_str()).collect();
        diff_names("complex type", &source_complex, &remote_complex, remote, &mut errors);

        let source_enums: Vec<_> = source.enum_types.iter().map(|e| e.name.as_str()).collect();
        let remote_enums: Vec<_> = remote.enum_types.iter().map(|e| e.name.as_str()).collect();
        diff_names("enum type", &source_enums, &remote_enums, remote, &mut errors);

        let source_actions: Vec<_> = source.actions.iter().map(|a| a.name.as_str()).collect();
        let remote_actions: Vec<_> = remote.actions.iter().map(|a| a.name.as_str()).collect();
        diff_names("action", &source_actions, &remote_actions, remote, &mut errors);

        let source_functions: Vec<_> = source.functions.iter().map(|f| f.name.as_str()).collect();
        let remote_functions: Vec<_> = remote.functions.iter().map(|f| f.name.as_str()).collect();
        diff_names("function", &source_functions, &remote_functions, remote, &mut errors);

        for remote_entity in &remote.entity_types {
            let Some(source_entity) = source.entity_type(remote_entity.name()) else {
                continue;
            };
            let mut detected =
                self.diff_properties(source_entity.properties(), remote_entity.properties());
            detected.extend(self.diff_navigation_properties(
                &source_entity.navigation_properties,
                &remote_entity.navigation_properties,
            ));
            push_type_group(&mut errors, remote, remote_entity.name(), detected);
        }

        for remote_complex in &remote.complex_types {
            let Some(source_complex) = source.complex_type(&remote_complex.name) else {
                continue;
            };
            let detected =
                self.diff_properties(&source_complex.properties, &remote_complex.properties);
            push_type_group(&mut errors, remote, &remote_complex.name, detected);
        }

        for remote_enum in &remote.enum_types {
            let Some(source_enum) = source.enum_type(&remote_enum.name) else {
                continue;
            };
            let source_members: Vec<_> = source_enum.members.iter().map(|m| m.name.as_str()).collect();
            let remote_members: Vec<_> = remote_enum.members.iter().map(|m| m.name.as_str()).collect();
            let mut detected = Vec::new();
            diff_member_names("member", &source_members, &remote_members, &mut detected);
            push_type_group(&mut errors, remote, &remote_enum.name, detected);
        }

        errors
    }

    fn diff_properties(&self, source: &[Property], remote: &[Property]) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let source_names: Vec<_> = source.iter().map(|p| p.name.as_str()).collect();
        let remote_names: Vec<_> = remote.iter().map(|p| p.name.as_str()).collect();
        diff_member_names("property", &source_names, &remote_names, &mut errors);

        for remote_property in remote {
            let Some(source_property) = source.iter().find(|p| p.name == remote_property.name)
            else {
                continue;
            };
            self.check_types(
                &remote_property.name,
                &source_property.type_identifier,
                &remote_property.type_identifier,
                &mut errors,
            );
        }

        errors
    }

    fn diff_navigation_properties(
        &self,
        source: &[NavigationProperty],
        remote: &[NavigationProperty],
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let source_names: Vec<_> = source.iter().map(|n| n.name.as_str()).collect();
        let remote_names: Vec<_> = remote.iter().map(|n| n.name.as_str()).collect();
        diff_member_names("navigation property", &source_names, &remote_names, &mut errors);

        for remote_navigation in remote {
            let Some(source_navigation) = source.iter().find(|n| n.name == remote_navigation.name)
            else {
                continue;
            };
            self.check_types(
                &remote_navigation.name,
                &source_navigation.type_identifier,
                &remote_navigation.type_identifier,
                &mut errors,
            );
        }

        errors
    }

    fn check_types(
        &self,
        property: &str,
        source_type: &str,
        remote_type: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if !self.equivalent_identifiers(source_type, remote_type) {
            errors.push(ValidationError::new(
                ValidationErrorCode::PropertyTypeMismatch,
                Some(property),
                format!(
                    "Property '{property}' is '{remote_type}' in remote but '{source_type}' in source."
                ),
            ));
        }
    }

    /// Identifiers are equivalent when their namespaces are equivalent and
    /// their type names are equal, with collection wrappers on both sides.
    pub fn equivalent_identifiers(&self, a: &str, b: &str) -> bool {
        match (unwrap_collection(a), unwrap_collection(b)) {
            (Some(inner_a), Some(inner_b)) => return self.equivalent_identifiers(inner_a, inner_b),
            (None, None) => {}
            _ => return false,
        }

        if a == b {
            return true;
        }
        if !has_namespace(a) || !has_namespace(b) {
            return false;
        }

        match (namespace_of(a), namespace_of(b)) {
            (Ok(ns_a), Ok(ns_b)) => {
                type_name_of(a) == type_name_of(b) && self.config.equivalent_namespaces(ns_a, ns_b)
            }
            _ => false,
        }
    }

    fn find_matching_schema<'a>(
        &self,
        remote_namespace: &str,
        source_schemas: &'a [Schema],
    ) -> Option<&'a Schema> {
        source_schemas
            .iter()
            .find(|schema| self.config.equivalent_namespaces(remote_namespace, &schema.namespace))
    }
}

/// Report names present on only one side.
fn diff_names(
    kind: &str,
    source: &[&str],
    remote: &[&str],
    remote_schema: &Schema,
    errors: &mut Vec<ValidationError>,
) {
    for name in remote.iter().filter(|n| !source.contains(n)) {
        errors.push(ValidationError::new(
            ValidationErrorCode::ResourceTypeNotFound,
            Some(REMOTE_CONTEXT),
            format!(
                "Remote {kind} '{}' not found in source.",
                qualify(&remote_schema.namespace, name)
            ),
        ));
    }
    for name in source.iter().filter(|n| !remote.contains(n)) {
        errors.push(ValidationError::new(
            ValidationErrorCode::ResourceTypeNotFound,
            Some(REMOTE_CONTEXT),
            format!(
                "Source {kind} '{}' missing from remote.",
                qualify(&remote_schema.namespace, name)
            ),
        ));
    }
}

fn diff_member_names(
    kind: &str,
    source: &[&str],
    remote: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    for name in remote.iter().filter(|n| !source.contains(n)) {
        errors.push(ValidationError::new(
            ValidationErrorCode::PropertyNotFound,
            Some(*name),
            format!("Remote {kind} '{name}' not found in source."),
        ));
    }
    for name in source.iter().filter(|n| !remote.contains(n)) {
        errors.push(ValidationError::new(
            ValidationErrorCode::PropertyNotFound,
            Some(*name),
            format!("Source {kind} '{name}' missing from remote."),
        ));
    }
}

fn push_type_group(
    errors: &mut Vec<ValidationError>,
    schema: &Schema,
    type_name: &str,
    detected: Vec<ValidationError>,
) {
    if !detected.is_empty() {
        errors.push(ValidationError::consolidated(
            detected,
            format!(
                "Type {} had changes from the source.",
                qualify(&schema.namespace, type_name)
            ),
        ));
    }
}
