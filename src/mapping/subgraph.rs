//! Subgraph extraction

use super::Mapper;
use crate::error::{MappingError, MappingResult};
use crate::rdf::Graph;
use tracing::debug;

impl Mapper {
    /// Every statement about `identifier`, copied into a fresh unnamed graph.
    ///
    /// Objects are not followed: a relation to another subject contributes
    /// the linking triple only.
    pub fn sub_graph(&self, graph: &Graph, identifier: &str) -> MappingResult<Graph> {
        let subject = self.config.to_subject(identifier)?;
        if !graph.has_subject(&subject) {
            return Err(MappingError::SubjectNotFound(identifier.to_string()));
        }

        let mut sub = Graph::new();
        for (predicate, object) in graph.predicate_objects(&subject) {
            sub.add(subject.clone(), predicate.clone(), object.clone());
        }
        debug!(subject = %subject, triples = sub.len(), "extracted subgraph");
        Ok(sub)
    }
}
