//! Actions and functions.

use serde::{Deserialize, Serialize};

/// An action or function declaration. Both share one shape; the schema
/// keeps them in separate collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    /// Whether the first parameter is the binding parameter.
    #[serde(default)]
    pub is_bound: bool,
    #[serde(default)]
    pub is_composable: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type identifier, if the operation returns a value.
    #[serde(default)]
    pub return_type: Option<String>,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_identifier: String,
    #[serde(default)]
    pub nullable: bool,
}

impl Operation {
    /// Create an unbound operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bound: false,
            is_composable: false,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// Create an operation bound to `binding_type`.
    pub fn bound(name: impl Into<String>, binding_type: impl Into<String>) -> Self {
        Self::new(name)
            .with_parameter(Parameter::new("bindingParameter", binding_type))
            .with_binding()
    }

    fn with_binding(mut self) -> Self {
        self.is_bound = true;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// The binding parameter of a bound operation.
    pub fn binding_parameter(&self) -> Option<&Parameter> {
        if self.is_bound {
            self.parameters.first()
        } else {
            None
        }
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_identifier: type_identifier.into(),
            nullable: false,
        }
    }
}
