//! Enumeration types.

use super::types::SimpleDataType;
use serde::{Deserialize, Serialize};

/// Underlying type assumed when an enum does not declare one.
pub const DEFAULT_ENUM_UNDERLYING_TYPE: &str = "Edm.Int32";

/// An enumeration type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    /// Wire name of the underlying integer type.
    #[serde(default)]
    pub underlying_type: Option<String>,
    /// Whether members may be combined as flags.
    #[serde(default)]
    pub is_flags: bool,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

/// A named enumeration member with its literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl EnumType {
    /// Create an empty enum type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying_type: None,
            is_flags: false,
            members: Vec::new(),
        }
    }

    /// Add a member with an explicit value.
    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    pub fn with_underlying_type(mut self, underlying_type: impl Into<String>) -> Self {
        self.underlying_type = Some(underlying_type.into());
        self
    }

    pub fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }

    /// The underlying type mapped through the simple type table.
    pub fn underlying_simple_type(&self) -> SimpleDataType {
        SimpleDataType::from_wire_name(
            self.underlying_type
                .as_deref()
                .unwrap_or(DEFAULT_ENUM_UNDERLYING_TYPE),
        )
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_members_keep_order() {
        let status = EnumType::new("status")
            .with_member("active", "0")
            .with_member("deleted", "1")
            .with_member("archived", "2");

        let names: Vec<_> = status.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["active", "deleted", "archived"]);
        assert_eq!(status.member("deleted").unwrap().value.as_deref(), Some("1"));
        assert!(status.member("missing").is_none());
    }

    #[test]
    fn test_underlying_type() {
        assert_eq!(EnumType::new("a").underlying_simple_type(), SimpleDataType::Int32);

        let wide = EnumType::new("b").with_underlying_type("Edm.Int64").flags();
        assert_eq!(wide.underlying_simple_type(), SimpleDataType::Int64);
        assert!(wide.is_flags);
    }
}
