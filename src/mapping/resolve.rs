//! Subject resolution: which subjects does a decode act on

use crate::error::{MappingError, MappingResult};
use crate::rdf::{rdf_type, Graph, RdfSubject, Triple};
use crate::schema::Schema;
use indexmap::IndexSet;

/// Subjects of `graph` selected by an optional identifier and schema.
///
/// | identifier | schema | result |
/// |---|---|---|
/// | yes | no  | `{identifier}` if it is a subject |
/// | yes | yes | `{identifier}` if it is a subject typed `schema.entity_type` |
/// | no  | yes | every subject typed `schema.entity_type` (maybe none) |
/// | no  | no  | every subject carrying any `rdf:type` |
pub fn resolve_subjects(
    graph: &Graph,
    identifier: Option<&RdfSubject>,
    schema: Option<&Schema>,
) -> MappingResult<IndexSet<RdfSubject>> {
    let Some(identifier) = identifier else {
        return Ok(graph.subjects_of_type(schema.map(Schema::entity_type)));
    };

    if !graph.has_subject(identifier) {
        return Err(MappingError::SubjectNotFound(identifier.to_id_string()));
    }
    if let Some(schema) = schema {
        let typed = Triple::new(
            identifier.clone(),
            rdf_type(),
            schema.entity_type().clone().into(),
        );
        if !graph.contains(&typed) {
            return Err(MappingError::TypeMismatch {
                identifier: identifier.to_id_string(),
                entity_type: schema.entity_type().as_str().to_string(),
            });
        }
    }
    Ok(IndexSet::from([identifier.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, NamedNode, RdfPredicate};

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn subject(iri: &str) -> RdfSubject {
        node(iri).into()
    }

    fn person_schema() -> Schema {
        Schema::builder("http://example.org/Person").build().unwrap()
    }

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        let name = RdfPredicate::new("http://example.org/name").unwrap();
        graph.add(subject("http://example.org/alice"), rdf_type(), node("http://example.org/Person"));
        graph.add(subject("http://example.org/bob"), rdf_type(), node("http://example.org/Person"));
        graph.add(subject("http://example.org/acme"), rdf_type(), node("http://example.org/Company"));
        graph.add(
            subject("http://example.org/untyped"),
            name,
            Literal::new_simple_literal("x"),
        );
        graph
    }

    #[test]
    fn test_identifier_only() {
        let graph = sample_graph();
        let alice = subject("http://example.org/alice");
        let found = resolve_subjects(&graph, Some(&alice), None).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains(&alice));

        let untyped = subject("http://example.org/untyped");
        assert_eq!(resolve_subjects(&graph, Some(&untyped), None).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_identifier() {
        let graph = sample_graph();
        let ghost = subject("http://example.org/ghost");
        let result = resolve_subjects(&graph, Some(&ghost), None);
        assert!(matches!(result, Err(MappingError::SubjectNotFound(id)) if id == "http://example.org/ghost"));

        let result = resolve_subjects(&graph, Some(&ghost), Some(&person_schema()));
        assert!(matches!(result, Err(MappingError::SubjectNotFound(_))));
    }

    #[test]
    fn test_identifier_and_schema() {
        let graph = sample_graph();
        let alice = subject("http://example.org/alice");
        let found = resolve_subjects(&graph, Some(&alice), Some(&person_schema())).unwrap();
        assert_eq!(found, IndexSet::from([alice]));

        let acme = subject("http://example.org/acme");
        let result = resolve_subjects(&graph, Some(&acme), Some(&person_schema()));
        assert!(matches!(result, Err(MappingError::TypeMismatch { .. })));
    }

    #[test]
    fn test_schema_only() {
        let graph = sample_graph();
        let found = resolve_subjects(&graph, None, Some(&person_schema())).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&subject("http://example.org/bob")));

        let other = Schema::builder("http://example.org/Robot").build().unwrap();
        assert!(resolve_subjects(&graph, None, Some(&other)).unwrap().is_empty());
    }

    #[test]
    fn test_everything_typed() {
        let graph = sample_graph();
        let found = resolve_subjects(&graph, None, None).unwrap();
        assert_eq!(found.len(), 3);
        assert!(!found.contains(&subject("http://example.org/untyped")));
    }
}
