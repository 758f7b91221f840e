use std::path::{Path, PathBuf};
use url::Url;

use crate::core::minter::is_forbidden_in_iri;
use crate::error::ConfigError;

pub const DEFAULT_BASE_NAMESPACE: &str = "https://mjavadf.github.io/gol-o-mey/rdf/graph.ttl#";
pub const DEFAULT_WORK_LABEL: &str = "rubaiyat";

/// Where a run reads its sources, where it writes the graph, and how entity
/// IRIs are formed. Paths are relative to the project root until
/// [`Configuration::rooted_at`] is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub tei_path: PathBuf,
    pub csv_path: PathBuf,
    pub output_path: PathBuf,
    pub base_namespace: String,
    pub work_label: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tei_path: PathBuf::from("tei/rubaiyat.xml"),
            csv_path: PathBuf::from("data/artwork_metadata.csv"),
            output_path: PathBuf::from("rdf/graph.ttl"),
            base_namespace: DEFAULT_BASE_NAMESPACE.to_string(),
            work_label: DEFAULT_WORK_LABEL.to_string(),
        }
    }
}

impl Configuration {
    /// Resolve relative source and output paths against a project root.
    pub fn rooted_at<P: AsRef<Path>>(mut self, root: P) -> Self {
        let root = root.as_ref();
        for path in [&mut self.tei_path, &mut self.csv_path, &mut self.output_path] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_namespace.is_empty() {
            return Err(ConfigError::Invalid("No base namespace defined".to_string()));
        }

        Url::parse(&self.base_namespace).map_err(|e| {
            ConfigError::Invalid(format!(
                "Base namespace is not an absolute IRI: {} ({})",
                self.base_namespace, e
            ))
        })?;

        if self.base_namespace.chars().any(is_forbidden_in_iri) {
            return Err(ConfigError::Invalid(format!(
                "Base namespace contains characters not allowed in an IRI: {:?}",
                self.base_namespace
            )));
        }

        if self.work_label.trim().is_empty() {
            return Err(ConfigError::Invalid("Work label must not be empty".to_string()));
        }

        Ok(())
    }
}
