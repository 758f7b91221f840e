use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use tracing::warn;
use url::Url;

/// Bytes left unescaped in a slug besides ASCII alphanumerics.
const SLUG_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Work,
    Person,
    Place,
    Object,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Work => "work",
            EntityKind::Person => "person",
            EntityKind::Place => "place",
            EntityKind::Object => "object",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives entity IRIs under a fixed base namespace.
///
/// The IRI depends on the label alone: the kind is carried for logging, so a
/// person named in the TEI header and an artist column in the CSV with the
/// same name end up on the same node. Labels that slug identically collide.
#[derive(Debug, Clone)]
pub struct UriMinter {
    base: String,
    base_url: Url,
}

impl UriMinter {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: base.to_string(),
            base_url: Url::parse(base)?,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Callers filter empty labels; an empty label mints the bare namespace.
    pub fn mint(&self, kind: EntityKind, label: &str) -> String {
        let uri = format!("{}{}", self.base, slug(label));
        tracing::trace!("Minted {} {}", kind, uri);
        uri
    }

    /// Turn an attribute or cell value into an IRI. Absolute IRIs are kept
    /// exactly as written; relative ones such as `#p1` are resolved against
    /// the base namespace the way a Turtle reader resolves them against the
    /// document. Values Turtle cannot hold between `<` and `>` are skipped.
    pub fn resolve_iri(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Some(c) = value.chars().find(|&c| is_forbidden_in_iri(c)) {
            warn!("Skipping value that is not an IRI: {:?} (contains {:?})", value, c);
            return None;
        }

        if Url::parse(value).is_ok() {
            return Some(value.to_string());
        }

        match self.base_url.join(value) {
            Ok(url) => Some(url.into()),
            Err(e) => {
                warn!("Skipping value that is not an IRI: {:?} ({})", value, e);
                None
            }
        }
    }
}

/// Characters an IRI reference may not contain unescaped.
pub fn is_forbidden_in_iri(c: char) -> bool {
    c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

pub fn slug(label: &str) -> String {
    let underscored = label.trim().replace(' ', "_");
    utf8_percent_encode(&underscored, SLUG_SAFE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.org/graph.ttl#";

    #[test]
    fn test_mint_is_deterministic() {
        let minter = UriMinter::new(BASE).unwrap();
        let a = minter.mint(EntityKind::Person, "Omar Khayyam");
        let b = minter.mint(EntityKind::Person, "Omar Khayyam");
        assert_eq!(a, b);
        assert_eq!(a, "https://example.org/graph.ttl#Omar_Khayyam");
    }

    #[test]
    fn test_mint_trims_and_keeps_unreserved() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(
            minter.mint(EntityKind::Object, "  Persian Miniature No. 4 "),
            "https://example.org/graph.ttl#Persian_Miniature_No._4"
        );
        assert_eq!(slug("al-Nishapuri_x~"), "al-Nishapuri_x~");
    }

    #[test]
    fn test_slug_percent_encodes_utf8() {
        assert_eq!(slug("Nīshāpūr"), "N%C4%ABsh%C4%81p%C5%ABr");
        assert_eq!(slug("Tus, Iran"), "Tus%2C_Iran");
        assert_eq!(slug("a/b"), "a%2Fb");
    }

    #[test]
    fn test_kind_does_not_change_uri() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(
            minter.mint(EntityKind::Person, "Rubaiyat"),
            minter.mint(EntityKind::Object, "Rubaiyat")
        );
    }

    #[test]
    fn test_resolve_iri() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(
            minter.resolve_iri(" http://viaf.org/viaf/12345 ").as_deref(),
            Some("http://viaf.org/viaf/12345")
        );
        assert_eq!(
            minter.resolve_iri("#p1").as_deref(),
            Some("https://example.org/graph.ttl#p1")
        );
        assert_eq!(minter.resolve_iri("  "), None);
    }

    #[test]
    fn test_absolute_iri_kept_verbatim() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(
            minter.resolve_iri("http://www.GeoNames.org").as_deref(),
            Some("http://www.GeoNames.org")
        );
        assert_eq!(
            minter.resolve_iri("https://viaf.org/viaf/1?q=%7e").as_deref(),
            Some("https://viaf.org/viaf/1?q=%7e")
        );
    }

    #[test]
    fn test_values_turtle_cannot_hold_are_skipped() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(minter.resolve_iri("http://example.org/a b"), None);
        assert_eq!(minter.resolve_iri("http://example.org/<x>"), None);
        assert_eq!(minter.resolve_iri("http://example.org/{id}"), None);
    }

    #[test]
    fn test_colliding_labels_share_uri() {
        let minter = UriMinter::new(BASE).unwrap();
        assert_eq!(
            minter.mint(EntityKind::Place, "Old Town"),
            minter.mint(EntityKind::Place, "Old_Town")
        );
    }
}
