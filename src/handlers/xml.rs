//! Owned XML element tree built with quick-xml, plus the small path language
//! the TEI extractor uses to locate headers, registries and mentions.
//!
//! Elements are matched on their local name so TEI documents can be queried
//! without spelling out the namespace. Attributes keep their qualified name
//! (`xml:id`, `ref`).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SourceError;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    order: usize,
}

impl XmlElement {
    /// Parse a complete document and return its root element.
    pub fn parse(source: &str) -> Result<XmlElement, SourceError> {
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut order = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let element = open_element(&start, &mut order, &reader)?;
                    stack.push(element);
                }
                Ok(Event::Empty(start)) => {
                    let element = open_element(&start, &mut order, &reader)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(end)) => {
                    let element = stack.pop().ok_or_else(|| {
                        SourceError::Structure(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        ))
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = text.unescape().map_err(|e| SourceError::Xml {
                            position: reader.buffer_position() as u64,
                            source: e.into(),
                        })?;
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&data).into_owned();
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                // declarations, comments, processing instructions, doctype
                Ok(_) => {}
                Err(source) => {
                    return Err(SourceError::Xml {
                        position: reader.error_position() as u64,
                        source,
                    });
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(SourceError::Structure(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| SourceError::Structure("document has no root element".to_string()))
    }

    /// Local name, without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Every element below this one in document order, excluding itself.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(&mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, found: &mut Vec<&'a XmlElement>) {
        for child in self.child_elements() {
            found.push(child);
            child.collect_descendants(found);
        }
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, text: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => text.push_str(t),
                XmlNode::Element(element) => element.collect_text(text),
            }
        }
    }

    /// Trimmed text content, `None` when it is empty.
    pub fn trimmed_text(&self) -> Option<String> {
        let text = self.text_content();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// All elements matched by `path`, in document order.
    pub fn find_all<'a>(&'a self, path: &ElementPath) -> Vec<&'a XmlElement> {
        let mut current: Vec<&XmlElement> = vec![self];

        for step in &path.steps {
            let mut next: Vec<&XmlElement> = Vec::new();
            for node in &current {
                match step.axis {
                    Axis::Child => next.extend(node.child_elements().filter(|e| step.matches(e))),
                    Axis::Descendant => {
                        next.extend(node.descendants().into_iter().filter(|e| step.matches(e)))
                    }
                }
            }
            next.sort_by_key(|e| e.order);
            next.dedup_by_key(|e| e.order);
            current = next;
        }

        current
    }

    pub fn find<'a>(&'a self, path: &ElementPath) -> Option<&'a XmlElement> {
        self.find_all(path).into_iter().next()
    }
}

fn open_element(
    start: &BytesStart<'_>,
    order: &mut usize,
    reader: &Reader<&[u8]>,
) -> Result<XmlElement, SourceError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SourceError::Xml {
            position: reader.buffer_position() as u64,
            source: e.into(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| SourceError::Xml {
            position: reader.buffer_position() as u64,
            source: e.into(),
        })?;
        attributes.push((key, value.into_owned()));
    }

    let element = XmlElement {
        name,
        attributes,
        children: Vec::new(),
        order: *order,
    };
    *order += 1;
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), SourceError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(SourceError::Structure(format!(
            "second root element <{}>",
            element.name
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    name: String,
    required_attr: Option<String>,
}

impl Step {
    fn matches(&self, element: &XmlElement) -> bool {
        element.name == self.name
            && self
                .required_attr
                .as_deref()
                .map_or(true, |attr| element.attr(attr).is_some())
    }
}

/// Relative element path, the subset of ElementTree paths written as
/// `.//listPerson/person` or `.//persName[@ref]`.
///
/// ```
/// use golomey_graph::handlers::ElementPath;
///
/// let mentions = ElementPath::descendant("persName").with_attr("ref");
/// let entries = ElementPath::descendant("listPerson").child("person");
/// # let _ = (mentions, entries);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementPath {
    steps: Vec<Step>,
}

impl ElementPath {
    /// `.//name`
    pub fn descendant(name: &str) -> Self {
        Self::default().then_descendant(name)
    }

    /// Append `/name`.
    pub fn child(mut self, name: &str) -> Self {
        self.steps.push(Step {
            axis: Axis::Child,
            name: name.to_string(),
            required_attr: None,
        });
        self
    }

    /// Append `//name`.
    pub fn then_descendant(mut self, name: &str) -> Self {
        self.steps.push(Step {
            axis: Axis::Descendant,
            name: name.to_string(),
            required_attr: None,
        });
        self
    }

    /// Require `[@attr]` on the last step.
    pub fn with_attr(mut self, attr: &str) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.required_attr = Some(attr.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title>Rubáiyát &amp; Quatrains</title>
      </titleStmt>
    </fileDesc>
    <listPerson>
      <person xml:id="p1"><persName>Omar <hi>Khayyam</hi></persName></person>
      <person xml:id="p2"/>
    </listPerson>
  </teiHeader>
  <text><body><p>In <placeName ref="#nish">Nishapur</placeName>, <persName ref="#p1">Omar</persName>
  <date when="1120"/><![CDATA[raw <text>]]></p></body></text>
</TEI>"##;

    #[test]
    fn test_parse_uses_local_names_and_qualified_attrs() {
        let root = XmlElement::parse(DOC).unwrap();
        assert_eq!(root.name(), "TEI");

        let people = root.find_all(&ElementPath::descendant("listPerson").child("person"));
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].attr("xml:id"), Some("p1"));
        assert_eq!(people[1].attr("xml:id"), Some("p2"));
    }

    #[test]
    fn test_text_content_includes_nested_elements() {
        let root = XmlElement::parse(DOC).unwrap();
        let name = root
            .find(&ElementPath::descendant("listPerson").then_descendant("persName"))
            .unwrap();
        assert_eq!(name.text_content(), "Omar Khayyam");

        let title = root
            .find(&ElementPath::descendant("fileDesc").child("titleStmt").child("title"))
            .unwrap();
        assert_eq!(title.trimmed_text().as_deref(), Some("Rubáiyát & Quatrains"));
    }

    #[test]
    fn test_attribute_predicate_filters() {
        let root = XmlElement::parse(DOC).unwrap();
        let all = root.find_all(&ElementPath::descendant("persName"));
        let with_ref = root.find_all(&ElementPath::descendant("persName").with_attr("ref"));
        assert_eq!(all.len(), 2);
        assert_eq!(with_ref.len(), 1);
        assert_eq!(with_ref[0].attr("ref"), Some("#p1"));
    }

    #[test]
    fn test_nested_descendant_steps_do_not_duplicate() {
        let root = XmlElement::parse("<a><b><b><c/></b></b></a>").unwrap();
        let found = root.find_all(&ElementPath::descendant("b").then_descendant("c"));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_child_axis_only_matches_direct_children() {
        let root = XmlElement::parse("<r><a><x><b/></x><b/></a></r>").unwrap();
        assert_eq!(root.find_all(&ElementPath::descendant("a").child("b")).len(), 1);
        assert_eq!(root.find_all(&ElementPath::descendant("b")).len(), 2);
    }

    #[test]
    fn test_cdata_is_text() {
        let root = XmlElement::parse(DOC).unwrap();
        let p = root.find(&ElementPath::descendant("p")).unwrap();
        assert!(p.text_content().contains("raw <text>"));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("<a><b>").is_err());
        assert!(matches!(
            XmlElement::parse("   "),
            Err(SourceError::Structure(_))
        ));
        assert!(XmlElement::parse("<a/><b/>").is_err());
    }
}
