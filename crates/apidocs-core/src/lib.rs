//! apidocs core - metadata graph, type resolution, and documentation checks.
//!
//! This crate models an OData-style service description as an
//! [`EntityFramework`], resolves type identifiers and service paths against
//! it, and compares it with the graph derived from written documentation.

pub mod compare;
pub mod config;
pub mod error;
pub mod identifier;
pub mod model;
pub mod navigation;
pub mod resolve;
pub mod validate;
pub mod validation;

pub use compare::CsdlComparer;
pub use config::{ComparerConfig, ValidationConfig, ValidationOptions};
pub use error::{Error, Result};
pub use model::{
    ComplexType, EntityContainer, EntityFramework, EntitySet, EntityType, EnumMember, EnumType,
    Key, NavigationProperty, Operation, Parameter, ParameterDataType, Property, Schema,
    SimpleDataType, Singleton,
};
pub use navigation::Navigable;
pub use resolve::resolve_resource_name;
pub use validation::{ValidationError, ValidationErrorCode};

// Validator exports
pub use validate::{
    generate_resources, DocSet, DocSetExampleChecker, DocumentedProperty, DocumentedResource,
    EdmxValidator, ExampleChecker, GraphBuilder, ResourceDefinition, ResourceGraphBuilder,
    ResourceMetadata,
};
