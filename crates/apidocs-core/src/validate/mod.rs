//! EDMX validation against documentation.
//!
//! Two independent checks are offered by [`EdmxValidator`]:
//!
//! - **Resource definitions**: every entity and complex type of the EDMX
//!   graph must be documented, and the example generated for it must pass
//!   the [`ExampleChecker`].
//! - **REST path definitions**: the graph built from the documentation by a
//!   [`GraphBuilder`] is compared schema by schema with the EDMX graph.

mod docs;
mod resources;

pub use docs::{
    DocSet, DocSetExampleChecker, DocumentedProperty, DocumentedResource, ExampleChecker,
    GraphBuilder, ResourceGraphBuilder,
};
pub use resources::{generate_resources, ResourceDefinition, ResourceMetadata};

use crate::compare::CsdlComparer;
use crate::config::{ComparerConfig, ValidationOptions};
use crate::error::Result;
use crate::model::EntityFramework;
use crate::validation::{ValidationError, ValidationErrorCode};
use tracing::{debug, info, warn};

/// Validates an EDMX metadata graph against a documentation set.
pub struct EdmxValidator<'a> {
    checker: &'a dyn ExampleChecker,
    builder: &'a dyn GraphBuilder,
    comparer: CsdlComparer,
}

impl<'a> EdmxValidator<'a> {
    /// Create a validator with the default comparer configuration.
    pub fn new(checker: &'a dyn ExampleChecker, builder: &'a dyn GraphBuilder) -> Self {
        Self {
            checker,
            builder,
            comparer: CsdlComparer::default(),
        }
    }

    /// Use `config` when comparing REST path definitions.
    pub fn with_comparer_config(mut self, config: ComparerConfig) -> Self {
        self.comparer = CsdlComparer::new(config);
        self
    }

    /// Check that every resource of `edmx` is documented and that its
    /// generated example passes the example checker.
    ///
    /// Undocumented resources are reported as leaf errors and skipped.
    /// Checker findings and example generation problems for one resource
    /// are grouped under a single consolidated error.
    pub fn compare_resource_definitions(
        &self,
        edmx: &EntityFramework,
        docs: &DocSet,
        options: &ValidationOptions,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let resources = generate_resources(edmx);
        debug!(resources = resources.len(), "Generated resource definitions");

        for resource in resources {
            if docs.resource(&resource.name).is_none() {
                warn!(resource = %resource.name, "Undocumented resource");
                errors.push(ValidationError::new(
                    ValidationErrorCode::ResourceTypeNotFound,
                    None,
                    format!("Undocumented resource found: {}", resource.name),
                ));
                continue;
            }

            let mut detected = resource.generation_errors;
            detected.extend(self.checker.validate(
                &resource.metadata,
                &resource.example_text,
                options,
            ));

            if !detected.is_empty() {
                errors.push(ValidationError::consolidated(
                    detected,
                    format!("Resource {} failed validation.", resource.name),
                ));
            }
        }

        info!(errors = errors.len(), "Resource definition check finished");
        errors
    }

    /// Build a graph from `docs` and compare it with `edmx`.
    ///
    /// The documentation graph is the source side and `edmx` the remote
    /// side of the comparison. A failure to build the documentation graph
    /// aborts the check.
    pub fn compare_rest_path_definitions(
        &self,
        edmx: &EntityFramework,
        docs: &DocSet,
    ) -> Result<Vec<ValidationError>> {
        let source = self.builder.generate(docs, None, None)?;
        debug!(
            schemas = source.schemas.len(),
            "Built documentation graph for comparison"
        );

        let errors = self.comparer.compare_frameworks(&source, edmx);
        info!(errors = errors.len(), "REST path definition check finished");
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComplexType, EntityType, ParameterDataType, Property, Schema, SimpleDataType};

    /// Checker that reports nothing.
    struct AcceptAll;

    impl ExampleChecker for AcceptAll {
        fn validate(
            &self,
            _metadata: &ResourceMetadata,
            _example_text: &str,
            _options: &ValidationOptions,
        ) -> Vec<ValidationError> {
            Vec::new()
        }
    }

    /// Builder that always fails.
    struct FailingBuilder;

    impl GraphBuilder for FailingBuilder {
        fn generate(
            &self,
            _docs: &DocSet,
            _base_url: Option<&str>,
            _namespaces: Option<&[String]>,
        ) -> Result<EntityFramework> {
            Err(crate::Error::NotImplemented("graph generation".to_string()))
        }
    }

    fn edmx() -> EntityFramework {
        EntityFramework::new().with_schema(
            Schema::new("graph")
                .with_entity_type(
                    EntityType::new("item", "id")
                        .with_property(Property::new("id", "Edm.String"))
                        .with_property(Property::new("name", "Edm.String")),
                )
                .with_complex_type(
                    ComplexType::new("hashes").with_property(Property::new("sha1", "Edm.String")),
                ),
        )
    }

    fn string_property(name: &str) -> DocumentedProperty {
        DocumentedProperty::new(name, ParameterDataType::simple(SimpleDataType::String))
    }

    #[test]
    fn test_undocumented_resources_do_not_stop_the_pass() {
        let docs = DocSet::new().with_resource(DocumentedResource::new("graph.hashes"));
        let checker = AcceptAll;
        let validator = EdmxValidator::new(&checker, &ResourceGraphBuilder);

        let errors =
            validator.compare_resource_definitions(&edmx(), &docs, &ValidationOptions::default());

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ValidationErrorCode::ResourceTypeNotFound);
        assert_eq!(errors[0].context(), None);
        assert_eq!(errors[0].message(), "Undocumented resource found: graph.item");
    }

    #[test]
    fn test_checker_errors_grouped_per_resource() {
        let docs = DocSet::new()
            .with_resource(
                DocumentedResource::new("graph.item")
                    .with_key("id")
                    .with_property(string_property("id"))
                    .with_property(string_property("size")),
            )
            .with_resource(DocumentedResource::new("graph.hashes").with_property(string_property("sha1")));
        let checker = DocSetExampleChecker::new(&docs);
        let validator = EdmxValidator::new(&checker, &ResourceGraphBuilder);

        let errors =
            validator.compare_resource_definitions(&edmx(), &docs, &ValidationOptions::default());

        assert_eq!(errors.len(), 1);
        let group = &errors[0];
        assert!(group.is_consolidated());
        assert_eq!(group.message(), "Resource graph.item failed validation.");

        let codes: Vec<_> = group.leaves().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                ValidationErrorCode::AdditionalPropertyDetected,
                ValidationErrorCode::MissingRequiredProperty,
            ]
        );
    }

    #[test]
    fn test_failures_after_undocumented_resource_still_reported() {
        let graph = EntityFramework::new().with_schema(
            Schema::new("graph")
                .with_entity_type(
                    EntityType::new("Drive", "id").with_property(Property::new("id", "Edm.String")),
                )
                .with_entity_type(
                    EntityType::new("item", "id")
                        .with_property(Property::new("id", "Edm.String"))
                        .with_property(Property::new("name", "Edm.String")),
                ),
        );
        let docs = DocSet::new().with_resource(
            DocumentedResource::new("graph.item")
                .with_key("id")
                .with_property(string_property("id")),
        );
        let checker = DocSetExampleChecker::new(&docs);
        let validator = EdmxValidator::new(&checker, &ResourceGraphBuilder);

        let errors =
            validator.compare_resource_definitions(&graph, &docs, &ValidationOptions::default());

        assert_eq!(errors.len(), 2, "unexpected errors: {errors:?}");
        assert!(!errors[0].is_consolidated());
        assert_eq!(errors[0].code(), ValidationErrorCode::ResourceTypeNotFound);
        assert_eq!(errors[0].message(), "Undocumented resource found: graph.Drive");

        assert!(errors[1].is_consolidated());
        assert_eq!(errors[1].message(), "Resource graph.item failed validation.");
        let codes: Vec<_> = errors[1].leaves().map(|e| e.code()).collect();
        assert_eq!(codes, vec![ValidationErrorCode::AdditionalPropertyDetected]);
    }

    #[test]
    fn test_rest_paths_compare_documentation_with_edmx() {
        let docs = DocSet::new()
            .with_resource(DocumentedResource::new("graph.item").with_key("id"))
            .with_resource(DocumentedResource::new("extra.widget"));
        let checker = AcceptAll;
        let validator = EdmxValidator::new(&checker, &ResourceGraphBuilder);

        let remote = edmx().with_schema(Schema::new("missing"));
        let errors = validator
            .compare_rest_path_definitions(&remote, &docs)
            .unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ValidationErrorCode::ResourceTypeNotFound);
        assert_eq!(errors[0].context(), Some(crate::compare::REMOTE_CONTEXT));
        assert!(errors[0].message().contains("'missing'"));
    }

    #[test]
    fn test_rest_paths_builder_failure_is_fatal() {
        let checker = AcceptAll;
        let validator = EdmxValidator::new(&checker, &FailingBuilder);

        let result = validator.compare_rest_path_definitions(&edmx(), &DocSet::new());
        assert!(matches!(result, Err(crate::Error::NotImplemented(_))));
    }

    #[test]
    fn test_rest_paths_respect_comparer_config() {
        let docs = DocSet::new().with_resource(DocumentedResource::new("oneDrive.item").with_key("id"));
        let checker = AcceptAll;
        let validator = EdmxValidator::new(&checker, &ResourceGraphBuilder)
            .with_comparer_config(ComparerConfig::new().with_alias("oneDrive", "graph"));

        let errors = validator.compare_rest_path_definitions(&edmx(), &docs).unwrap();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }
}
