use std::collections::HashMap;
use tracing::{debug, info};

use crate::core::vocab::{OWL_SAME_AS, RDF_TYPE};
use crate::core::UriMinter;
use crate::handlers::{ElementPath, XmlElement};
use crate::knowledge_graph::{KnowledgeGraph, Term};

use super::EntityProfile;

/// Attributes on a registry entry that carry external identities.
const IDENTITY_ATTRIBUTES: [&str; 2] = ["sameAs", "ref"];

/// Lookup from a document-local reference (`#p1`) to the IRI minted for the
/// registry entry with that `xml:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityIndex {
    entries: HashMap<String, String>,
}

impl AuthorityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: String, uri: String) {
        self.entries.insert(reference, uri);
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mint one entity per registry entry (`listPerson/person`, `listPlace/place`)
/// and return the index used to resolve inline mentions.
///
/// The display name comes from `name_path` below the entry, falling back to
/// the entry's `xml:id`; entries with neither are skipped.
pub fn index_authority_list(
    graph: &mut KnowledgeGraph,
    minter: &UriMinter,
    root: &XmlElement,
    entries: &ElementPath,
    name_path: &ElementPath,
    profile: EntityProfile,
) -> AuthorityIndex {
    let mut index = AuthorityIndex::new();

    for entry in root.find_all(entries) {
        let xml_id = entry
            .attr("xml:id")
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let label = entry
            .find(name_path)
            .and_then(XmlElement::trimmed_text)
            .or_else(|| xml_id.map(str::to_string));

        let Some(label) = label else {
            debug!("Skipping <{}> registry entry without a label", entry.name());
            continue;
        };

        let uri = minter.mint(profile.kind, &label);
        graph.add(&uri, RDF_TYPE, Term::iri(profile.rdf_type));
        graph.add(&uri, profile.label_predicate, label.as_str());

        for attr in IDENTITY_ATTRIBUTES {
            for token in entry.attr(attr).unwrap_or_default().split_whitespace() {
                graph.add_if_present(&uri, OWL_SAME_AS, minter.resolve_iri(token).map(Term::Iri));
            }
        }

        if let Some(id) = xml_id {
            index.insert(format!("#{}", id), uri);
        }
    }

    info!("Indexed {} {} registry entries", index.len(), profile.kind);
    index
}
