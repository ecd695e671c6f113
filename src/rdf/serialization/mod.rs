//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)

mod turtle;

use super::{Graph, Triple};
use std::path::Path;
use thiserror::Error;

pub use turtle::{NTriplesCodec, TurtleCodec};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => TurtleCodec::parse(input),
            RdfFormat::NTriples => NTriplesCodec::parse(input),
        }
    }

    /// Parse RDF data into a fresh graph
    pub fn parse_graph(input: &str, format: RdfFormat) -> ParseResult<Graph> {
        Ok(Self::parse(input, format)?.into_iter().collect())
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat) -> ParseResult<Graph> {
        let input = std::fs::read_to_string(path)?;
        Self::parse_graph(&input, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize<'a>(
        triples: impl IntoIterator<Item = &'a Triple>,
        format: RdfFormat,
    ) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleCodec::serialize(triples),
            RdfFormat::NTriples => NTriplesCodec::serialize(triples),
        }
    }

    /// Serialize a whole graph to a string
    pub fn serialize_graph(graph: &Graph, format: RdfFormat) -> SerializeResult<String> {
        Self::serialize(graph.iter(), format)
    }
}
