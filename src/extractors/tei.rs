use tracing::{debug, info};

use crate::core::vocab::{
    DCTERMS_CREATOR, DCTERMS_DATE, DCTERMS_TITLE, FOAF_NAME, FOAF_PERSON, RDF_TYPE,
    SCHEMA_CREATIVE_WORK, SCHEMA_KEYWORDS, XSD_DATE, XSD_GYEAR,
};
use crate::core::{EntityKind, UriMinter};
use crate::handlers::{ElementPath, XmlElement};
use crate::knowledge_graph::{KnowledgeGraph, Term};

use super::{index_authority_list, resolve_mentions, AuthorityIndex, PERSON, PLACE};

/// What the TEI pass contributed, for the run summary.
#[derive(Debug, Clone)]
pub struct TeiSummary {
    pub work_uri: String,
    pub persons: AuthorityIndex,
    pub places: AuthorityIndex,
    pub mentions: usize,
    pub keywords: usize,
}

/// Tag a `when` value by shape only: `YYYY-MM-DD` is an `xsd:date`, four
/// characters an `xsd:gYear`, anything else stays a plain literal.
pub fn date_term(when: &str) -> Term {
    let chars: Vec<char> = when.chars().collect();
    if chars.len() == 10 && chars[4] == '-' {
        Term::typed(when, XSD_DATE)
    } else if chars.len() == 4 {
        Term::typed(when, XSD_GYEAR)
    } else {
        Term::literal(when)
    }
}

/// Describe the work encoded in `root` and link the people and places it
/// names. Every step tolerates missing elements.
pub fn extract_tei(
    graph: &mut KnowledgeGraph,
    minter: &UriMinter,
    root: &XmlElement,
    work_label: &str,
) -> TeiSummary {
    let work_uri = minter.mint(EntityKind::Work, work_label);
    graph.add(&work_uri, RDF_TYPE, Term::iri(SCHEMA_CREATIVE_WORK));

    let title_stmt = ElementPath::descendant("fileDesc").child("titleStmt");

    let title = root
        .find(&title_stmt.clone().child("title"))
        .and_then(XmlElement::trimmed_text);
    graph.add_if_present(&work_uri, DCTERMS_TITLE, title);

    if let Some(author) = root
        .find(&title_stmt.child("author"))
        .and_then(XmlElement::trimmed_text)
    {
        let person = minter.mint(EntityKind::Person, &author);
        graph.add(&person, RDF_TYPE, Term::iri(FOAF_PERSON));
        graph.add(&person, FOAF_NAME, author.as_str());
        graph.add(&work_uri, DCTERMS_CREATOR, Term::iri(&person));
    }

    let creation_date = ElementPath::descendant("profileDesc")
        .then_descendant("creation")
        .then_descendant("date")
        .with_attr("when");
    let any_date = ElementPath::descendant("date").with_attr("when");

    let when = root
        .find(&creation_date)
        .or_else(|| root.find(&any_date))
        .and_then(|date| date.attr("when"));
    match when {
        Some(when) => {
            graph.add_if_present(&work_uri, DCTERMS_DATE, Some(date_term(when)));
        }
        None => debug!("No dated element found in TEI document"),
    }

    let persons = index_authority_list(
        graph,
        minter,
        root,
        &ElementPath::descendant("listPerson").child("person"),
        &ElementPath::descendant("persName"),
        PERSON,
    );
    let places = index_authority_list(
        graph,
        minter,
        root,
        &ElementPath::descendant("listPlace").child("place"),
        &ElementPath::descendant("placeName"),
        PLACE,
    );

    let mut mentions = resolve_mentions(
        graph,
        minter,
        root,
        &work_uri,
        &ElementPath::descendant("persName").with_attr("ref"),
        &persons,
        PERSON,
    );
    mentions += resolve_mentions(
        graph,
        minter,
        root,
        &work_uri,
        &ElementPath::descendant("placeName").with_attr("ref"),
        &places,
        PLACE,
    );

    let terms = ElementPath::descendant("textClass")
        .then_descendant("keywords")
        .then_descendant("term");
    let mut keywords = 0;
    for term in root.find_all(&terms) {
        if graph.add_if_present(&work_uri, SCHEMA_KEYWORDS, term.trimmed_text()) {
            keywords += 1;
        }
    }

    info!(
        "TEI: {} persons, {} places indexed; {} mentions, {} keywords",
        persons.len(),
        places.len(),
        mentions,
        keywords
    );

    TeiSummary {
        work_uri,
        persons,
        places,
        mentions,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocab::{OWL_SAME_AS, RDFS_LABEL, SCHEMA_MENTIONS, SCHEMA_PLACE};

    const BASE: &str = "https://example.org/graph.ttl#";
    const WORK: &str = "https://example.org/graph.ttl#rubaiyat";

    const RUBAIYAT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title>Rubáiyát of Omar Khayyám</title>
        <author>Edward FitzGerald</author>
      </titleStmt>
      <sourceDesc><bibl><date when="1859">1859</date></bibl></sourceDesc>
    </fileDesc>
    <profileDesc>
      <creation><date when="1120-05-01">c. 1120</date></creation>
      <textClass>
        <keywords scheme="#lcsh">
          <term>Persian poetry</term>
          <term> </term>
          <term>Quatrains</term>
        </keywords>
      </textClass>
      <particDesc>
        <listPerson>
          <person xml:id="omar" sameAs="http://www.wikidata.org/entity/Q35900">
            <persName>Omar Khayyam</persName>
          </person>
        </listPerson>
      </particDesc>
      <settingDesc>
        <listPlace>
          <place xml:id="naishapur"><placeName>Naishápúr</placeName></place>
        </listPlace>
      </settingDesc>
    </profileDesc>
  </teiHeader>
  <text>
    <body>
      <lg>
        <l>Whether at <placeName ref="#naishapur">Naishápúr</placeName> or
           <placeName ref="http://www.geonames.org/99532">Babylon</placeName>,</l>
        <l>said <persName ref="#omar">Khayyám</persName> to
           <persName ref="https://viaf.org/viaf/100185495">Jamshyd</persName></l>
      </lg>
    </body>
  </text>
</TEI>"##;

    fn extract(document: &str) -> (KnowledgeGraph, TeiSummary) {
        let root = XmlElement::parse(document).unwrap();
        let minter = UriMinter::new(BASE).unwrap();
        let mut graph = KnowledgeGraph::new();
        let summary = extract_tei(&mut graph, &minter, &root, "rubaiyat");
        (graph, summary)
    }

    #[test]
    fn test_date_term_shapes() {
        assert_eq!(date_term("1120"), Term::typed("1120", XSD_GYEAR));
        assert_eq!(date_term("1120-05-01"), Term::typed("1120-05-01", XSD_DATE));
        assert_eq!(date_term("circa 1120"), Term::literal("circa 1120"));
        assert_eq!(date_term("1120-5-1"), Term::literal("1120-5-1"));
        // shape check only, not calendar validation
        assert_eq!(date_term("1120-13-99"), Term::typed("1120-13-99", XSD_DATE));
        assert_eq!(date_term("abcd"), Term::typed("abcd", XSD_GYEAR));
    }

    #[test]
    fn test_work_header() {
        let (graph, summary) = extract(RUBAIYAT);
        assert_eq!(summary.work_uri, WORK);
        assert!(graph.contains(WORK, RDF_TYPE, &Term::iri(SCHEMA_CREATIVE_WORK)));
        assert!(graph.contains(WORK, DCTERMS_TITLE, &Term::literal("Rubáiyát of Omar Khayyám")));

        let fitzgerald = "https://example.org/graph.ttl#Edward_FitzGerald";
        assert!(graph.contains(WORK, DCTERMS_CREATOR, &Term::iri(fitzgerald)));
        assert!(graph.contains(fitzgerald, RDF_TYPE, &Term::iri(FOAF_PERSON)));
        assert!(graph.contains(fitzgerald, FOAF_NAME, &Term::literal("Edward FitzGerald")));
    }

    #[test]
    fn test_creation_date_preferred_over_other_dates() {
        let (graph, _) = extract(RUBAIYAT);
        let dates: Vec<_> = graph.objects(WORK, DCTERMS_DATE).cloned().collect();
        assert_eq!(dates, vec![Term::typed("1120-05-01", XSD_DATE)]);
    }

    #[test]
    fn test_date_falls_back_to_any_dated_element() {
        let (graph, _) = extract(r#"<TEI><text><date when="circa 1120"/></text></TEI>"#);
        let dates: Vec<_> = graph.objects(WORK, DCTERMS_DATE).cloned().collect();
        assert_eq!(dates, vec![Term::literal("circa 1120")]);
    }

    #[test]
    fn test_mentions_resolve_through_registries() {
        let (graph, summary) = extract(RUBAIYAT);
        assert_eq!(summary.persons.len(), 1);
        assert_eq!(summary.places.len(), 1);
        assert_eq!(summary.mentions, 4);

        let omar = "https://example.org/graph.ttl#Omar_Khayyam";
        assert!(graph.contains(WORK, SCHEMA_MENTIONS, &Term::iri(omar)));
        assert!(graph.contains(
            omar,
            OWL_SAME_AS,
            &Term::iri("http://www.wikidata.org/entity/Q35900")
        ));
        // the mention text "Khayyám" never becomes its own entity
        assert_eq!(graph.about("https://example.org/graph.ttl#Khayy%C3%A1m").count(), 0);

        let naishapur = format!("{}{}", BASE, crate::core::minter::slug("Naishápúr"));
        assert!(graph.contains(WORK, SCHEMA_MENTIONS, &Term::iri(&naishapur)));
        assert!(graph.contains(&naishapur, RDFS_LABEL, &Term::literal("Naishápúr")));

        let babylon = "https://example.org/graph.ttl#Babylon";
        assert!(graph.contains(babylon, RDF_TYPE, &Term::iri(SCHEMA_PLACE)));
        assert!(graph.contains(babylon, OWL_SAME_AS, &Term::iri("http://www.geonames.org/99532")));

        let jamshyd = "https://example.org/graph.ttl#Jamshyd";
        assert!(graph.contains(
            jamshyd,
            OWL_SAME_AS,
            &Term::iri("https://viaf.org/viaf/100185495")
        ));
    }

    #[test]
    fn test_keywords_skip_blank_terms() {
        let (graph, summary) = extract(RUBAIYAT);
        assert_eq!(summary.keywords, 2);
        assert!(graph.contains(WORK, SCHEMA_KEYWORDS, &Term::literal("Persian poetry")));
        assert!(graph.contains(WORK, SCHEMA_KEYWORDS, &Term::literal("Quatrains")));
    }

    #[test]
    fn test_without_registries_mentions_still_mint() {
        let (graph, summary) = extract(
            r##"<TEI><text><p><persName ref="#omar">Omar</persName> in
                 <placeName ref="#tus">Tus</placeName></p></text></TEI>"##,
        );
        assert!(summary.persons.is_empty());
        assert!(summary.places.is_empty());
        assert_eq!(summary.mentions, 2);
        assert!(graph.contains(
            WORK,
            SCHEMA_MENTIONS,
            &Term::iri("https://example.org/graph.ttl#Omar")
        ));
        assert!(graph.contains(
            WORK,
            SCHEMA_MENTIONS,
            &Term::iri("https://example.org/graph.ttl#Tus")
        ));
    }

    #[test]
    fn test_bare_document_only_types_the_work() {
        let (graph, summary) = extract("<TEI/>");
        assert_eq!(summary.mentions, 0);
        assert_eq!(graph.len(), 1);
    }
}
