use std::io::Read;
use tracing::{debug, info};

use crate::core::vocab::{
    DCTERMS_PROVENANCE, DCTERMS_RIGHTS, DCTERMS_TITLE, FOAF_NAME, FOAF_PAGE, FOAF_PERSON,
    RDF_TYPE, SCHEMA_ARTFORM, SCHEMA_CREATIVE_WORK, SCHEMA_CREATOR, SCHEMA_DATE_CREATED,
    SCHEMA_IMAGE, SCHEMA_KEYWORDS, SCHEMA_LOCATION_CREATED, SCHEMA_MATERIAL,
};
use crate::core::{EntityKind, UriMinter};
use crate::error::SourceError;
use crate::knowledge_graph::{KnowledgeGraph, Term};

const UNTITLED: &str = "Untitled";

/// Columns whose values are web pages about the artwork.
const LINK_COLUMNS: [&str; 3] = ["URL", "source_uri", "lod_uri"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkSummary {
    pub rows: usize,
    pub artists: usize,
}

/// One CSV record viewed through its header row.
struct ArtworkRow<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
}

impl<'a> ArtworkRow<'a> {
    /// Trimmed cell value; missing columns and blank cells are `None`.
    fn get(&self, column: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Map each artwork record to a `schema:CreativeWork`.
///
/// The reader must yield a header row; all recognised columns are optional.
/// Short records leave their trailing columns absent, and cells past the last
/// header are ignored.
/// `Subjects` is kept as one literal even when it lists several subjects.
pub fn extract_artworks<R: Read>(
    graph: &mut KnowledgeGraph,
    minter: &UriMinter,
    source: R,
) -> Result<ArtworkSummary, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let mut summary = ArtworkSummary::default();

    for result in reader.records() {
        let record = result?;
        let row = ArtworkRow { headers: &headers, record: &record };

        let title = row.get("Title").unwrap_or(UNTITLED);
        let object = minter.mint(EntityKind::Object, title);
        graph.add(&object, RDF_TYPE, Term::iri(SCHEMA_CREATIVE_WORK));
        graph.add(&object, DCTERMS_TITLE, title);

        if let Some(artist) = row.get("Artist") {
            let person = minter.mint(EntityKind::Person, artist);
            graph.add(&person, RDF_TYPE, Term::iri(FOAF_PERSON));
            graph.add(&person, FOAF_NAME, artist);
            graph.add(&object, SCHEMA_CREATOR, Term::iri(&person));
            summary.artists += 1;
        }

        graph.add_if_present(&object, SCHEMA_DATE_CREATED, row.get("Date"));
        graph.add_if_present(&object, SCHEMA_LOCATION_CREATED, row.get("Location"));
        graph.add_if_present(
            &object,
            SCHEMA_MATERIAL,
            row.get("MediumsDescription").or_else(|| row.get("Mediums")),
        );
        graph.add_if_present(&object, DCTERMS_PROVENANCE, row.get("CreditLine"));
        graph.add_if_present(&object, SCHEMA_ARTFORM, row.get("Classification"));
        graph.add_if_present(&object, SCHEMA_KEYWORDS, row.get("Subjects"));
        graph.add_if_present(&object, DCTERMS_RIGHTS, row.get("rights"));

        for column in LINK_COLUMNS {
            let page = row.get(column).and_then(|v| minter.resolve_iri(v));
            graph.add_if_present(&object, FOAF_PAGE, page.map(Term::Iri));
        }
        let image = row.get("image_uri").and_then(|v| minter.resolve_iri(v));
        graph.add_if_present(&object, SCHEMA_IMAGE, image.map(Term::Iri));

        debug!("Artwork row {} -> {}", summary.rows + 1, object);
        summary.rows += 1;
    }

    info!("CSV: {} artworks, {} with an artist", summary.rows, summary.artists);
    Ok(summary)
}
