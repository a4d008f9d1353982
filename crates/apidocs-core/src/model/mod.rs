//! Metadata graph for OData-style service descriptions.
//!
//! The graph is an [`EntityFramework`] holding ordered [`Schema`]s, each of
//! which owns its entity, complex and enum types, actions and functions.
//! References between members (navigation targets, property and parameter
//! types) are identifier strings resolved on demand.

mod container;
mod enum_type;
mod framework;
mod operation;
mod property;
mod schema;
mod structured;
mod types;

pub use container::{EntityContainer, EntitySet, Singleton};
pub use enum_type::{EnumMember, EnumType, DEFAULT_ENUM_UNDERLYING_TYPE};
pub use framework::EntityFramework;
pub use operation::{Operation, Parameter};
pub use property::{Key, NavigationProperty, Property};
pub use schema::Schema;
pub use structured::{ComplexType, EntityType};
pub use types::{ParameterDataType, SimpleDataType};
