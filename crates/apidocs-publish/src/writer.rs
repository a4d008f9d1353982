//! Writes the documentation's metadata graph as `metadata.edmx`.

use crate::edmx::generate_edmx;
use crate::error::PublishError;
use apidocs_core::{DocSet, GraphBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the published artifact.
pub const METADATA_FILE_NAME: &str = "metadata.edmx";

/// Publishes a documentation set as an EDMX metadata document.
#[derive(Debug, Clone, Default)]
pub struct CsdlWriter {
    namespaces: Vec<String>,
    base_url: Option<String>,
}

impl CsdlWriter {
    /// Create a writer exporting only `namespaces`; empty exports all.
    pub fn new(namespaces: Vec<String>, base_url: Option<String>) -> Self {
        Self {
            namespaces,
            base_url,
        }
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Build the graph from `docs`, serialize it, and write it into
    /// `output_folder`, creating the folder if needed.
    ///
    /// Returns the path of the written file.
    pub async fn publish_to_folder(
        &self,
        docs: &DocSet,
        builder: &dyn GraphBuilder,
        output_folder: impl AsRef<Path>,
    ) -> Result<PathBuf, PublishError> {
        let filter = (!self.namespaces.is_empty()).then_some(self.namespaces.as_slice());
        let graph = builder.generate(docs, self.base_url(), filter)?;
        debug!(schemas = graph.schemas.len(), "Built metadata graph");

        let xml = generate_edmx(&graph);

        let output_folder = output_folder.as_ref();
        tokio::fs::create_dir_all(output_folder).await?;

        let path = output_folder.join(METADATA_FILE_NAME);
        tokio::fs::write(&path, xml.as_bytes()).await?;

        info!(path = %path.display(), bytes = xml.len(), "Published metadata");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs_core::{
        DocumentedProperty, DocumentedResource, EntityFramework, ParameterDataType,
        ResourceGraphBuilder, SimpleDataType,
    };

    fn docs() -> DocSet {
        DocSet::new()
            .with_resource(
                DocumentedResource::new("graph.item").with_key("id").with_property(
                    DocumentedProperty::new("id", ParameterDataType::simple(SimpleDataType::String)),
                ),
            )
            .with_resource(DocumentedResource::new("beta.widget"))
    }

    #[tokio::test]
    async fn test_publish_creates_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("nested");

        let writer = CsdlWriter::default();
        let path = writer
            .publish_to_folder(&docs(), &ResourceGraphBuilder, &output)
            .await
            .unwrap();

        assert_eq!(path, output.join(METADATA_FILE_NAME));
        let xml = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(xml.contains(r#"<EntityType Name="item">"#));
        assert!(xml.contains(r#"<Schema Namespace="beta""#));
    }

    #[tokio::test]
    async fn test_publish_filters_namespaces() {
        let dir = tempfile::tempdir().unwrap();

        let writer = CsdlWriter::new(
            vec!["graph".to_string()],
            Some("https://graph.example.com/v1.0".to_string()),
        );
        let path = writer
            .publish_to_folder(&docs(), &ResourceGraphBuilder, dir.path())
            .await
            .unwrap();

        let xml = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(xml.contains(r#"<Schema Namespace="graph""#));
        assert!(!xml.contains(r#"<Schema Namespace="beta""#));
    }

    #[tokio::test]
    async fn test_publish_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE_NAME), "stale").unwrap();

        let path = CsdlWriter::default()
            .publish_to_folder(&docs(), &ResourceGraphBuilder, dir.path())
            .await
            .unwrap();

        let xml = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(!xml.contains("stale"));
    }

    struct BrokenBuilder;

    impl GraphBuilder for BrokenBuilder {
        fn generate(
            &self,
            _docs: &DocSet,
            _base_url: Option<&str>,
            _namespaces: Option<&[String]>,
        ) -> apidocs_core::Result<EntityFramework> {
            Err(apidocs_core::Error::NotImplemented("broken".to_string()))
        }
    }

    #[tokio::test]
    async fn test_build_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never");

        let result = CsdlWriter::default()
            .publish_to_folder(&docs(), &BrokenBuilder, &output)
            .await;

        assert!(matches!(result, Err(PublishError::Build(_))));
        assert!(!output.exists());
    }
}
