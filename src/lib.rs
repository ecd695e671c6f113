//! triplemap
//!
//! Schema-driven, bidirectional mapping between typed records and RDF
//! triples.
//!
//! A [`Schema`] names an RDF class and maps record fields to predicates.
//! Encoding walks a record's fields and emits one triple per value; decoding
//! selects subjects of a [`Graph`] by identifier and/or type, folds their
//! statements back into attribute mappings and, optionally, materializes
//! typed records through `serde`.
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use triplemap::{encode, to_builtin, Schema};
//!
//! let schema = Schema::builder("foaf:Person")
//!     .field("name", "foaf:name")
//!     .repeated_relation("friends", "foaf:knows")
//!     .build()
//!     .unwrap();
//!
//! let record = json!({
//!     "id": "http://example.org/alice",
//!     "name": "Alice",
//!     "friends": ["http://example.org/bob"]
//! });
//! let graph = encode(record.as_object().unwrap(), Some(&schema), None).unwrap();
//! assert_eq!(graph.len(), 3);
//!
//! let decoded = to_builtin(&graph, Some("http://example.org/alice"), Some(&schema)).unwrap();
//! assert_eq!(decoded[0]["friends"], json!(["http://example.org/bob"]));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod mapping;
pub mod rdf;
pub mod record;
pub mod schema;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, MappingConfig};
pub use error::{MappingError, MappingResult};
pub use mapping::{fold_statements, resolve_subjects, Arity, Attributes, FoldedValue, Mapper};
pub use rdf::{
    BlankNode, Graph, GraphName, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple,
};
pub use record::{FieldReadable, LinkedData, StructRecord};
pub use schema::{FieldInfo, Schema, SchemaBuilder, SchemaError, SchemaResult, ValueKind};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

/// Encode a record into a fresh graph with the default configuration
pub fn encode<R: FieldReadable + ?Sized>(
    record: &R,
    schema: Option<&Schema>,
    identifier: Option<&str>,
) -> MappingResult<Graph> {
    Mapper::default().encode(record, schema, identifier)
}

/// Encode a record into an existing graph with the default configuration
pub fn encode_into<R: FieldReadable + ?Sized>(
    record: &R,
    schema: Option<&Schema>,
    graph: &mut Graph,
) -> MappingResult<()> {
    Mapper::default().encode_into(record, schema, graph)
}

/// Encode a typed record under its own schema
pub fn encode_struct<T: LinkedData>(record: &T) -> MappingResult<Graph> {
    Mapper::default().encode_struct(record)
}

/// Statements about one subject, as a fresh graph
pub fn sub_graph(graph: &Graph, identifier: &str) -> MappingResult<Graph> {
    Mapper::default().sub_graph(graph, identifier)
}

/// Decode the selected subjects of a graph into attribute mappings
pub fn to_builtin(
    graph: &Graph,
    identifier: Option<&str>,
    schema: Option<&Schema>,
) -> MappingResult<Vec<Map<String, Value>>> {
    Mapper::default().to_builtin(graph, identifier, schema)
}

/// Decode one typed record
pub fn to_struct<T: LinkedData>(
    graph: &Graph,
    identifier: &str,
    schema: Option<&Schema>,
) -> MappingResult<T> {
    Mapper::default().to_struct(graph, identifier, schema)
}

/// Decode one record of any deserializable type under `schema`
pub fn to_record<T: DeserializeOwned>(
    graph: &Graph,
    identifier: &str,
    schema: &Schema,
) -> MappingResult<T> {
    Mapper::default().to_record(graph, identifier, schema)
}
