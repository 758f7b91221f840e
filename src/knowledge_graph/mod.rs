use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::debug;

/// Object position of a statement: an IRI or a literal, optionally typed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(String),
    Literal {
        value: String,
        datatype: Option<String>,
    },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal { value: value.into(), datatype: None }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal { value: value.into(), datatype: Some(datatype.into()) }
    }

    /// Lexical text of the term: the IRI itself or the literal's value.
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Literal { value, .. } => value,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.lexical().trim().is_empty()
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::literal(value)
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::literal(value)
    }
}

impl From<&String> for Term {
    fn from(value: &String) -> Self {
        Term::literal(value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RdfTriple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl RdfTriple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// Append-only statement set shared by both extractors for one run.
#[derive(Debug, Default)]
pub struct KnowledgeGraph {
    triples: BTreeSet<RdfTriple>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement; returns false when it was already present.
    pub fn add(&mut self, subject: &str, predicate: &str, object: impl Into<Term>) -> bool {
        let triple = RdfTriple::new(subject, predicate, object.into());
        let inserted = self.triples.insert(triple);
        if inserted {
            debug!("Added triple <{}> <{}>", subject, predicate);
        }
        inserted
    }

    /// Adds the statement unless the value is absent or blank text.
    /// Plain strings become untyped literals; `Term`s are kept as given.
    pub fn add_if_present<T: Into<Term>>(
        &mut self,
        subject: &str,
        predicate: &str,
        value: Option<T>,
    ) -> bool {
        match value.map(Into::into) {
            Some(term) if !term.is_blank() => self.add(subject, predicate, term),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn statistics(&self) -> KnowledgeGraphStats {
        let mut unique_subjects = HashSet::new();
        let mut unique_predicates = HashSet::new();
        let mut unique_objects = HashSet::new();

        for triple in &self.triples {
            unique_subjects.insert(&triple.subject);
            unique_predicates.insert(&triple.predicate);
            unique_objects.insert(&triple.object);
        }

        KnowledgeGraphStats {
            total_triples: self.triples.len(),
            unique_subjects: unique_subjects.len(),
            unique_predicates: unique_predicates.len(),
            unique_objects: unique_objects.len(),
        }
    }
}

#[cfg(test)]
impl KnowledgeGraph {
    pub(crate) fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples.iter().any(|t| {
            t.subject == subject && t.predicate == predicate && &t.object == object
        })
    }

    pub(crate) fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// All statements about one subject.
    pub(crate) fn about<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a RdfTriple> + 'a {
        self.triples.iter().filter(move |t| t.subject == subject)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RdfTriple> {
        self.triples.iter()
    }
}

impl<'a> IntoIterator for &'a KnowledgeGraph {
    type Item = &'a RdfTriple;
    type IntoIter = std::collections::btree_set::Iter<'a, RdfTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeGraphStats {
    pub total_triples: usize,
    pub unique_subjects: usize,
    pub unique_predicates: usize,
    pub unique_objects: usize,
}

impl fmt::Display for KnowledgeGraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
            "Knowledge Graph Statistics:\n\
             Total Triples: {}\n\
             Unique Subjects: {}\n\
             Unique Predicates: {}\n\
             Unique Objects: {}",
            self.total_triples,
            self.unique_subjects,
            self.unique_predicates,
            self.unique_objects
        )
    }
}
