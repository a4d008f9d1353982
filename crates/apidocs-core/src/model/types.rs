//! Simple (primitive) data types and the wire-name table.

use crate::error::{Error, Result};
use crate::identifier::{unwrap_collection, wrap_collection};
use crate::model::EntityFramework;
use crate::resolve::resolve_resource_name;
use serde::{Deserialize, Serialize};

/// Primitive data types understood by the metadata model.
///
/// `Object` is the unresolved case: any wire name not in the table maps to
/// it, and it is the only value that can carry a custom type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimpleDataType {
    String,
    Int32,
    Int64,
    Boolean,
    DateTimeOffset,
    Double,
    Float,
    Guid,
    TimeSpan,
    Stream,
    #[default]
    Object,
    Collection,
}

/// Wire names and the simple types they map to. Exactly one entry per
/// value; `Collection` has no wire name of its own.
const ODATA_SIMPLE_TYPES: &[(&str, SimpleDataType)] = &[
    ("Edm.String", SimpleDataType::String),
    ("Edm.Int64", SimpleDataType::Int64),
    ("Edm.Int32", SimpleDataType::Int32),
    ("Edm.Boolean", SimpleDataType::Boolean),
    ("Edm.DateTimeOffset", SimpleDataType::DateTimeOffset),
    ("Edm.Double", SimpleDataType::Double),
    ("Edm.Float", SimpleDataType::Float),
    ("Edm.Guid", SimpleDataType::Guid),
    ("Edm.TimeSpan", SimpleDataType::TimeSpan),
    ("Edm.Stream", SimpleDataType::Stream),
    ("Edm.Object", SimpleDataType::Object),
];

impl SimpleDataType {
    /// Convert a wire name like `Edm.String` into a simple type.
    ///
    /// Unknown names map to `Object` rather than failing.
    pub fn from_wire_name(name: &str) -> Self {
        ODATA_SIMPLE_TYPES
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, simple)| *simple)
            .unwrap_or(SimpleDataType::Object)
    }

    /// The wire name for this simple type.
    pub fn wire_name(self) -> Result<&'static str> {
        ODATA_SIMPLE_TYPES
            .iter()
            .find(|(_, simple)| *simple == self)
            .map(|(wire, _)| *wire)
            .ok_or(Error::UnsupportedSimpleType(self))
    }

    /// Convert into a wire name, substituting `custom_name` for `Object`.
    ///
    /// When a graph is given, a bare custom name is qualified with the
    /// namespace of the schema that declares it.
    pub fn to_wire_name(
        self,
        custom_name: Option<&str>,
        graph: Option<&EntityFramework>,
    ) -> Result<String> {
        match (self, custom_name) {
            (SimpleDataType::Object, Some(custom)) if !custom.is_empty() => match graph {
                Some(graph) => resolve_resource_name(custom, graph),
                None => Ok(custom.to_string()),
            },
            _ => self.wire_name().map(str::to_string),
        }
    }

    pub fn is_object(self) -> bool {
        self == SimpleDataType::Object
    }
}

/// The declared type of a documented property or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParameterDataType {
    /// Primitive kind; `Object` for custom types, `Collection` for arrays.
    pub simple_type: SimpleDataType,
    /// Name of the custom type for `Object` (or a collection of objects).
    #[serde(default)]
    pub custom_type_name: Option<String>,
    /// Element type when `simple_type` is `Collection`.
    #[serde(default)]
    pub collection_type: Option<SimpleDataType>,
}

impl ParameterDataType {
    /// A primitive type.
    pub fn simple(simple_type: SimpleDataType) -> Self {
        Self {
            simple_type,
            custom_type_name: None,
            collection_type: None,
        }
    }

    /// A custom (complex or entity) type referenced by name.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            simple_type: SimpleDataType::Object,
            custom_type_name: Some(name.into()),
            collection_type: None,
        }
    }

    /// A collection of a primitive type.
    pub fn collection_of(element: SimpleDataType) -> Self {
        Self {
            simple_type: SimpleDataType::Collection,
            custom_type_name: None,
            collection_type: Some(element),
        }
    }

    /// A collection of a custom type.
    pub fn collection_of_custom(name: impl Into<String>) -> Self {
        Self {
            simple_type: SimpleDataType::Collection,
            custom_type_name: Some(name.into()),
            collection_type: Some(SimpleDataType::Object),
        }
    }

    /// Parse a wire identifier, e.g. `Edm.String` or `Collection(graph.item)`.
    pub fn from_wire_name(identifier: &str) -> Self {
        if let Some(inner) = unwrap_collection(identifier) {
            return match SimpleDataType::from_wire_name(inner) {
                SimpleDataType::Object if inner != "Edm.Object" => {
                    Self::collection_of_custom(inner)
                }
                element => Self::collection_of(element),
            };
        }

        match SimpleDataType::from_wire_name(identifier) {
            SimpleDataType::Object if identifier != "Edm.Object" => Self::custom(identifier),
            simple => Self::simple(simple),
        }
    }

    pub fn is_collection(&self) -> bool {
        self.simple_type == SimpleDataType::Collection
    }

    /// Format as a wire identifier, qualifying custom names through `graph`.
    pub fn to_wire_name(&self, graph: Option<&EntityFramework>) -> Result<String> {
        let custom = self.custom_type_name.as_deref();
        match self.simple_type {
            SimpleDataType::Collection => {
                let element = self.collection_type.unwrap_or(SimpleDataType::Object);
                Ok(wrap_collection(&element.to_wire_name(custom, graph)?))
            }
            simple => simple.to_wire_name(custom, graph),
        }
    }
}
