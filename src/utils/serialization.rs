use anyhow::{Context, Result};
use rio_api::model::Literal;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::minter::is_forbidden_in_iri;
use crate::core::vocab::{PREFIXES, RDF_TYPE};
use crate::knowledge_graph::{KnowledgeGraph, Term};

/// Writes a graph as Turtle, one block per subject, with the fixed prefix
/// table and the empty prefix bound to the entity namespace.
pub struct TurtleSerializer {
    prefixes: Vec<(String, String)>,
}

impl TurtleSerializer {
    pub fn new(base_namespace: &str) -> Self {
        let mut prefixes = vec![(String::new(), base_namespace.to_string())];
        prefixes.extend(
            PREFIXES
                .iter()
                .map(|(prefix, namespace)| (prefix.to_string(), namespace.to_string())),
        );
        Self { prefixes }
    }

    pub fn serialize(&self, graph: &KnowledgeGraph) -> String {
        let mut output = String::new();

        for (prefix, namespace) in &self.prefixes {
            let _ = writeln!(output, "@prefix {}: {} .", prefix, iri_ref(namespace));
        }

        // subject -> predicate -> objects, rdf:type first within each subject
        let mut subjects: BTreeMap<&str, BTreeMap<(bool, &str), Vec<&Term>>> = BTreeMap::new();
        for triple in graph {
            subjects
                .entry(triple.subject.as_str())
                .or_default()
                .entry((triple.predicate != RDF_TYPE, triple.predicate.as_str()))
                .or_default()
                .push(&triple.object);
        }

        for (subject, predicates) in subjects {
            output.push('\n');
            output.push_str(&self.format_iri(subject));

            let count = predicates.len();
            for (i, ((_, predicate), objects)) in predicates.into_iter().enumerate() {
                let predicate = if predicate == RDF_TYPE {
                    "a".to_string()
                } else {
                    self.format_iri(predicate)
                };
                let objects: Vec<String> =
                    objects.into_iter().map(|o| self.format_term(o)).collect();

                if i == 0 {
                    output.push(' ');
                } else {
                    output.push_str("    ");
                }
                output.push_str(&predicate);
                output.push(' ');
                output.push_str(&objects.join(",\n        "));
                output.push_str(if i + 1 == count { " .\n" } else { " ;\n" });
            }
        }

        output
    }

    /// Serialize the graph to `path` and return the number of statements.
    /// The document is rendered in full before the file is created.
    pub fn write_to_file(&self, graph: &KnowledgeGraph, path: &Path) -> Result<usize> {
        let turtle = self.serialize(graph);
        fs::write(path, turtle)
            .with_context(|| format!("Failed to write Turtle output: {}", path.display()))?;

        info!("Knowledge graph exported to: {} ({} triples)", path.display(), graph.len());
        Ok(graph.len())
    }

    fn format_iri(&self, iri: &str) -> String {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .map(|(prefix, namespace)| (prefix, &iri[namespace.len()..]))
            .filter(|(_, local)| is_prefixed_local(local))
            .max_by_key(|(_, local)| std::cmp::Reverse(local.len()))
            .map(|(prefix, local)| format!("{}:{}", prefix, local))
            .unwrap_or_else(|| iri_ref(iri))
    }

    fn format_term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.format_iri(iri),
            Term::Literal { value, datatype: None } => {
                Literal::Simple { value: value.as_str() }.to_string()
            }
            Term::Literal { value, datatype: Some(datatype) } => format!(
                "{}^^{}",
                Literal::Simple { value: value.as_str() },
                self.format_iri(datatype)
            ),
        }
    }
}

/// `<iri>`, with characters Turtle forbids in an IRI reference written as
/// `\u` escapes.
fn iri_ref(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len() + 2);
    out.push('<');
    for c in iri.chars() {
        if is_forbidden_in_iri(c) {
            let _ = write!(out, "\\u{:04X}", c as u32);
        } else {
            out.push(c);
        }
    }
    out.push('>');
    out
}

/// Whether `local` can be written after a prefix without escapes.
fn is_prefixed_local(local: &str) -> bool {
    let bytes = local.as_bytes();
    if bytes.is_empty() || bytes[bytes.len() - 1] == b'.' {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3);
                if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
                continue;
            }
            b'-' | b'.' if i == 0 => return false,
            c if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' || c == b'.' => {}
            _ => return false,
        }
        i += 1;
    }

    true
}
