pub mod artwork;
pub mod authority;
pub mod mentions;
pub mod tei;

use crate::core::vocab::{FOAF_NAME, FOAF_PERSON, RDFS_LABEL, SCHEMA_PLACE};
use crate::core::EntityKind;

pub use artwork::{extract_artworks, ArtworkSummary};
pub use authority::{index_authority_list, AuthorityIndex};
pub use mentions::resolve_mentions;
pub use tei::{date_term, extract_tei, TeiSummary};

/// How entities of one kind are typed and labelled in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityProfile {
    pub kind: EntityKind,
    pub rdf_type: &'static str,
    pub label_predicate: &'static str,
}

pub const PERSON: EntityProfile = EntityProfile {
    kind: EntityKind::Person,
    rdf_type: FOAF_PERSON,
    label_predicate: FOAF_NAME,
};

pub const PLACE: EntityProfile = EntityProfile {
    kind: EntityKind::Place,
    rdf_type: SCHEMA_PLACE,
    label_predicate: RDFS_LABEL,
};
