//! One run: read both sources, extract into a single graph, write Turtle.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::config::Configuration;
use crate::core::UriMinter;
use crate::extractors::{extract_artworks, extract_tei, ArtworkSummary, TeiSummary};
use crate::handlers::{read_source, XmlElement};
use crate::knowledge_graph::{KnowledgeGraph, KnowledgeGraphStats};
use crate::utils::TurtleSerializer;

#[derive(Debug)]
pub struct BuildResult {
    pub graph: KnowledgeGraph,
    pub tei: TeiSummary,
    pub artworks: ArtworkSummary,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_path: PathBuf,
    pub triples: usize,
    pub stats: KnowledgeGraphStats,
    pub processing_time_seconds: f64,
}

/// Build the graph in memory. Both sources are read in full before any
/// extraction starts; a malformed source aborts the build.
pub fn build_graph(config: &Configuration) -> Result<BuildResult> {
    config.validate()?;
    let minter = UriMinter::new(&config.base_namespace)
        .with_context(|| format!("Invalid base namespace: {}", config.base_namespace))?;

    let tei_source = read_source(&config.tei_path)?;
    let csv_source = read_source(&config.csv_path)?;

    let tei_root = XmlElement::parse(&tei_source)
        .with_context(|| format!("Failed to parse TEI document: {}", config.tei_path.display()))?;

    let mut graph = KnowledgeGraph::new();

    let tei = extract_tei(&mut graph, &minter, &tei_root, &config.work_label);
    let artworks = extract_artworks(&mut graph, &minter, csv_source.as_bytes())
        .with_context(|| format!("Failed to read artwork CSV: {}", config.csv_path.display()))?;

    Ok(BuildResult { graph, tei, artworks })
}

/// Build the graph and serialize it to the configured output path.
pub fn run(config: &Configuration) -> Result<BuildReport> {
    let start_time = Instant::now();

    let BuildResult { graph, .. } = build_graph(config)?;

    let serializer = TurtleSerializer::new(&config.base_namespace);
    let triples = serializer.write_to_file(&graph, &config.output_path)?;

    let processing_time_seconds = start_time.elapsed().as_secs_f64();
    info!("Graph built in {:.2}s", processing_time_seconds);

    Ok(BuildReport {
        output_path: config.output_path.clone(),
        triples,
        stats: graph.statistics(),
        processing_time_seconds,
    })
}
