pub mod config;
pub mod core;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod knowledge_graph;
pub mod pipeline;
pub mod utils;

pub use config::Configuration;
pub use core::{EntityKind, UriMinter};
pub use error::{ConfigError, SourceError};
pub use knowledge_graph::{KnowledgeGraph, RdfTriple, Term};
pub use pipeline::{build_graph, run, BuildReport};
pub use utils::TurtleSerializer;
