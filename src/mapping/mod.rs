//! Record ⇄ triple mapping
//!
//! # Mapping Strategy
//!
//! ## Record → RDF
//!
//! - Record identifier → subject
//! - Schema entity type → `rdf:type` triple
//! - Each schema field → one triple per value, under the field's predicate
//!
//! ## RDF → Record
//!
//! - Subjects are selected by identifier and/or type
//! - Each subject's statements fold into an attribute mapping keyed by field
//!   name (or predicate IRI without a schema)
//! - Attribute mappings materialize typed records through serde

mod decode;
mod emit;
mod encode;
mod fold;
mod resolve;
mod subgraph;

pub use emit::emit_value;
pub use fold::{fold_statements, Arity, Attributes, FoldedValue};
pub use resolve::resolve_subjects;

use crate::config::MappingConfig;

/// Entry point for encoding and decoding under one configuration
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MappingConfig,
}

impl Mapper {
    /// Create a mapper with a custom configuration
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }
}
