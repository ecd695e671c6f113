//! RDF support for the record mapper
//!
//! This module provides the graph side of the mapping:
//! - RDF terms and triples (subject-predicate-object)
//! - An in-memory graph with set semantics and a subject index
//! - Namespace prefixes and the vocabulary the mapper relies on
//! - Turtle and N-Triples serialization
//!
//! # Example
//!
//! ```rust
//! use triplemap::rdf::{Graph, Literal, NamedNode, RdfPredicate};
//!
//! let mut graph = Graph::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! graph.add(subject.clone(), predicate, object);
//!
//! let results: Vec<_> = graph.triples_for_subject(&subject.into()).collect();
//! assert_eq!(results.len(), 1);
//! ```

mod graph;
mod namespace;
mod serialization;
mod types;

pub use types::{
    BlankNode, GraphName, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult,
    RdfSubject, Triple,
};

pub use graph::Graph;

pub use namespace::{
    rdf_json, rdf_type, xsd_string, NamespaceManager, PrefixError, PrefixResult,
};

pub use serialization::{
    NTriplesCodec, ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer,
    SerializeError, SerializeResult, TurtleCodec,
};
