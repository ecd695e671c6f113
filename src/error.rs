//! Error types for record ⇄ triple mapping

use crate::rdf::RdfError;
use thiserror::Error;

/// Errors raised while encoding records into a graph or decoding them back
#[derive(Error, Debug)]
pub enum MappingError {
    /// No schema argument and the record carries none
    #[error("A schema must be provided to convert a record to a graph")]
    MissingSchema,

    /// The record exposes none of the accepted identifier attributes
    #[error("Record has no identifier (looked for: {})", .0.join(", "))]
    IdentifierMissing(Vec<String>),

    /// A field declared by the schema cannot be read off the record
    #[error("Record has no attribute for schema field: {0}")]
    MissingField(String),

    /// An explicit identifier is not a subject of the graph
    #[error("Identifier {0} not in graph")]
    SubjectNotFound(String),

    /// An explicit identifier exists but is not typed with the schema's class
    #[error("Object identified by {identifier} is not of type {entity_type} in graph")]
    TypeMismatch {
        identifier: String,
        entity_type: String,
    },

    /// A schema-aware fold met a predicate the schema does not map
    #[error("Predicate {predicate} of {subject} has no field in the schema")]
    UnmappedPredicate { subject: String, predicate: String },

    /// A non-repeatable field received a second value
    #[error("Field {field} of {subject} is not repeatable but received more than one value")]
    CardinalityViolation { subject: String, field: String },

    /// A relation field holds something that is not an identifier
    #[error("Field {field} is a relation but holds a non-identifier value: {value}")]
    InvalidRelation { field: String, value: String },

    /// An identifier could not be turned into a graph reference
    #[error("Invalid identifier: {0}")]
    InvalidIri(#[from] RdfError),

    /// The record could not be materialized from its attribute mapping
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record could not be turned into an attribute mapping
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

pub type MappingResult<T> = Result<T, MappingError>;
