//! Qualified type identifiers.
//!
//! An identifier is `namespace.name`, optionally wrapped as
//! `Collection(namespace.name)`. Namespaces may themselves contain dots, so
//! the split always happens on the last one.

use crate::error::{Error, Result};

const COLLECTION_PREFIX: &str = "Collection(";
const COLLECTION_SUFFIX: &str = ")";

/// Returns `"oneDrive"` for `"oneDrive.item"`.
pub fn namespace_of(identifier: &str) -> Result<&str> {
    match identifier.rfind('.') {
        Some(index) => Ok(&identifier[..index]),
        None => Err(Error::MalformedIdentifier {
            identifier: identifier.to_string(),
        }),
    }
}

/// Returns `"item"` for `"oneDrive.item"`.
///
/// An identifier without a dot is returned whole. An identifier ending in a
/// dot yields an empty string; callers that need a name must check for it.
pub fn type_name_of(identifier: &str) -> &str {
    match identifier.rfind('.') {
        Some(index) => &identifier[index + 1..],
        None => identifier,
    }
}

pub fn has_namespace(identifier: &str) -> bool {
    identifier.contains('.')
}

/// Join a namespace and a type name.
pub fn qualify(namespace: &str, name: &str) -> String {
    format!("{namespace}.{name}")
}

/// Wrap an identifier as `Collection(identifier)`.
pub fn wrap_collection(identifier: &str) -> String {
    format!("{COLLECTION_PREFIX}{identifier}{COLLECTION_SUFFIX}")
}

/// Inner identifier of a `Collection(...)` wrapper, or `None` if not wrapped.
pub fn unwrap_collection(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(COLLECTION_PREFIX)
        .and_then(|rest| rest.strip_suffix(COLLECTION_SUFFIX))
}

pub fn is_collection(identifier: &str) -> bool {
    unwrap_collection(identifier).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualified_identifier() {
        assert_eq!(namespace_of("oneDrive.item").unwrap(), "oneDrive");
        assert_eq!(type_name_of("oneDrive.item"), "item");

        assert_eq!(namespace_of("microsoft.graph.driveItem").unwrap(), "microsoft.graph");
        assert_eq!(type_name_of("microsoft.graph.driveItem"), "driveItem");
    }

    #[test]
    fn test_namespace_requires_dot() {
        let err = namespace_of("item").unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { identifier } if identifier == "item"));

        assert!(!has_namespace("item"));
        assert!(has_namespace("graph.item"));
        assert_eq!(type_name_of("item"), "item");
    }

    #[test]
    fn test_trailing_dot_yields_empty_type_name() {
        // Not rejected: the namespace part is still well formed.
        assert_eq!(type_name_of("graph."), "");
        assert_eq!(namespace_of("graph.").unwrap(), "graph");
    }

    #[test]
    fn test_collection_wrapping() {
        let wrapped = wrap_collection("graph.item");
        assert_eq!(wrapped, "Collection(graph.item)");
        assert!(is_collection(&wrapped));
        assert_eq!(unwrap_collection(&wrapped), Some("graph.item"));

        assert!(!is_collection("graph.item"));
        assert_eq!(unwrap_collection("graph.item"), None);
        assert_eq!(unwrap_collection("Collection(graph.item"), None);
    }

    #[test]
    fn test_wrap_unwrap_preserves_type_name() {
        for id in ["graph.item", "Edm.String", "microsoft.graph.driveItem", "a.b.c.d"] {
            let wrapped = wrap_collection(id);
            let inner = unwrap_collection(&wrapped).unwrap();
            assert_eq!(inner, id);
            assert_eq!(type_name_of(inner), type_name_of(id));
        }
    }

    #[test]
    fn test_nested_collection_unwraps_one_level() {
        let wrapped = wrap_collection(&wrap_collection("graph.item"));
        assert_eq!(unwrap_collection(&wrapped), Some("Collection(graph.item)"));
    }
}
