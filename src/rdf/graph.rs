//! In-memory RDF graph
//!
//! A set of triples with a subject index. Iteration follows insertion order,
//! which is what lets repeated values come back out in the order they were
//! written.

use super::namespace::rdf_type;
use super::types::{GraphName, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// RDF graph with set semantics
///
/// Inserting a triple that is already present is a no-op. Lookups by subject
/// go through an index mapping each subject to the positions of its triples.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Graph identifier
    name: GraphName,

    /// All triples (primary storage, insertion ordered)
    triples: IndexSet<Triple>,

    /// Subject -> positions in `triples`
    subject_index: FxHashMap<RdfSubject, Vec<usize>>,
}

impl Graph {
    /// Create an empty graph with a fresh blank node name
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given name
    pub fn with_name(name: GraphName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Graph identifier
    pub fn name(&self) -> &GraphName {
        &self.name
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let subject = triple.subject.clone();
        let (pos, inserted) = self.triples.insert_full(triple);
        if inserted {
            self.subject_index.entry(subject).or_default().push(pos);
        }
        inserted
    }

    /// Insert a triple built from its parts
    pub fn add(
        &mut self,
        subject: impl Into<RdfSubject>,
        predicate: impl Into<RdfPredicate>,
        object: impl Into<RdfObject>,
    ) -> bool {
        self.insert(Triple::new(subject.into(), predicate.into(), object.into()))
    }

    /// Copy every triple of `other` into this graph
    pub fn merge(&mut self, other: &Graph) {
        self.extend(other.iter().cloned());
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples with a specific subject, in insertion order
    pub fn triples_for_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.subject_index
            .get(subject)
            .into_iter()
            .flatten()
            .filter_map(move |pos| self.triples.get_index(*pos))
    }

    /// (predicate, object) pairs of a subject, in insertion order
    pub fn predicate_objects<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> impl Iterator<Item = (&'a RdfPredicate, &'a RdfObject)> + 'a {
        self.triples_for_subject(subject)
            .map(|triple| (&triple.predicate, &triple.object))
    }

    /// Whether any triple has `subject` in subject position
    pub fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.subject_index.contains_key(subject)
    }

    /// Subjects carrying `rdf:type class`, or any `rdf:type` when `class` is None
    pub fn subjects_of_type(&self, class: Option<&NamedNode>) -> IndexSet<RdfSubject> {
        let type_pred = rdf_type();
        self.triples
            .iter()
            .filter(|t| t.predicate == type_pred)
            .filter(|t| match (class, &t.object) {
                (None, _) => true,
                (Some(class), RdfObject::NamedNode(n)) => n == class,
                (Some(_), _) => false,
            })
            .map(|t| t.subject.clone())
            .collect()
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
