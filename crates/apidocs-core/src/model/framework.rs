//! EntityFramework - the root of a metadata graph.

use super::Schema;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An ordered collection of schemas.
///
/// Namespaces need not be unique; lookups scan schemas in declaration order
/// and return the first structural match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityFramework {
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

impl EntityFramework {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// First schema declaring `namespace`.
    pub fn schema(&self, namespace: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.namespace == namespace)
    }

    /// All schemas declaring `namespace`, in declaration order.
    pub fn schemas_in<'a, 'n>(
        &'a self,
        namespace: &'n str,
    ) -> impl Iterator<Item = &'a Schema> + 'n
    where
        'a: 'n,
    {
        self.schemas.iter().filter(move |s| s.namespace == namespace)
    }

    /// Namespaces in declaration order.
    pub fn namespaces(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.namespace.as_str()).collect()
    }

    /// Load a graph from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a graph from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize the graph as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
