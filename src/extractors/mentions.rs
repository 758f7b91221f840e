use tracing::{debug, info};

use crate::core::vocab::{OWL_SAME_AS, RDF_TYPE, SCHEMA_MENTIONS};
use crate::core::UriMinter;
use crate::handlers::{ElementPath, XmlElement};
use crate::knowledge_graph::{KnowledgeGraph, Term};

use super::{AuthorityIndex, EntityProfile};

/// Link every inline mention matched by `mentions` to the work.
///
/// A `ref` found in the authority index reuses the registry entity as is.
/// Anything else mints an entity from the mention's label; when the `ref`
/// itself is an http(s) IRI it becomes the new entity's `owl:sameAs`.
/// Returns the number of mentions linked.
pub fn resolve_mentions(
    graph: &mut KnowledgeGraph,
    minter: &UriMinter,
    root: &XmlElement,
    work_uri: &str,
    mentions: &ElementPath,
    index: &AuthorityIndex,
    profile: EntityProfile,
) -> usize {
    let mut linked = 0;
    let mut minted = 0;

    for mention in root.find_all(mentions) {
        let reference = mention.attr("ref").map(str::trim).unwrap_or_default();

        let uri = match index.get(reference) {
            Some(uri) => uri.to_string(),
            None => {
                let label = mention
                    .trimmed_text()
                    .or_else(|| {
                        mention
                            .attr("key")
                            .filter(|key| !key.trim().is_empty())
                            .map(str::to_string)
                    })
                    .or_else(|| (!reference.is_empty()).then(|| reference.to_string()));

                let Some(label) = label else {
                    debug!("Skipping <{}> mention without label or reference", mention.name());
                    continue;
                };

                let uri = minter.mint(profile.kind, &label);
                graph.add(&uri, RDF_TYPE, Term::iri(profile.rdf_type));
                graph.add_if_present(&uri, profile.label_predicate, Some(label.as_str()));
                if reference.starts_with("http") {
                    let same_as = minter.resolve_iri(reference).map(Term::Iri);
                    graph.add_if_present(&uri, OWL_SAME_AS, same_as);
                }
                minted += 1;
                uri
            }
        };

        graph.add(work_uri, SCHEMA_MENTIONS, Term::Iri(uri));
        linked += 1;
    }

    info!(
        "Linked {} {} mentions ({} minted outside the registry)",
        linked, profile.kind, minted
    );
    linked
}
