use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or parsing one of the source documents.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read source file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source {origin} is not valid {encoding}")]
    Encoding {
        origin: String,
        encoding: &'static str,
    },

    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed XML: {0}")]
    Structure(String),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
