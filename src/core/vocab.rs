//! Vocabulary IRIs used by the extractors and the Turtle prefix table.

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const SCHEMA: &str = "http://schema.org/";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";

pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_GYEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";

pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DCTERMS_CREATOR: &str = "http://purl.org/dc/terms/creator";
pub const DCTERMS_DATE: &str = "http://purl.org/dc/terms/date";
pub const DCTERMS_PROVENANCE: &str = "http://purl.org/dc/terms/provenance";
pub const DCTERMS_RIGHTS: &str = "http://purl.org/dc/terms/rights";

pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
pub const FOAF_PAGE: &str = "http://xmlns.com/foaf/0.1/page";

pub const SCHEMA_CREATIVE_WORK: &str = "http://schema.org/CreativeWork";
pub const SCHEMA_PLACE: &str = "http://schema.org/Place";
pub const SCHEMA_MENTIONS: &str = "http://schema.org/mentions";
pub const SCHEMA_KEYWORDS: &str = "http://schema.org/keywords";
pub const SCHEMA_CREATOR: &str = "http://schema.org/creator";
pub const SCHEMA_DATE_CREATED: &str = "http://schema.org/dateCreated";
pub const SCHEMA_LOCATION_CREATED: &str = "http://schema.org/locationCreated";
pub const SCHEMA_MATERIAL: &str = "http://schema.org/material";
pub const SCHEMA_ARTFORM: &str = "http://schema.org/artform";
pub const SCHEMA_IMAGE: &str = "http://schema.org/image";

/// Prefixes written at the top of every Turtle document. The empty prefix is
/// bound separately to the configured base namespace.
pub const PREFIXES: &[(&str, &str)] = &[
    ("dcterms", DCTERMS),
    ("foaf", FOAF),
    ("owl", OWL),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("schema", SCHEMA),
    ("xsd", XSD),
];
