//! Decoding: graph → attribute mappings and typed records

use super::fold::fold_statements;
use super::resolve::resolve_subjects;
use super::Mapper;
use crate::codec;
use crate::error::{MappingError, MappingResult};
use crate::rdf::Graph;
use crate::record::LinkedData;
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

impl Mapper {
    /// Decode the selected subjects of `graph` into attribute mappings.
    ///
    /// Each mapping holds the subject identifier under the configured id key,
    /// followed by its folded attributes. An empty identifier counts as none.
    /// Without an identifier the result may be empty; with one, an absent or
    /// mistyped subject is an error.
    pub fn to_builtin(
        &self,
        graph: &Graph,
        identifier: Option<&str>,
        schema: Option<&Schema>,
    ) -> MappingResult<Vec<Map<String, Value>>> {
        let identifier = identifier
            .filter(|identifier| !identifier.is_empty())
            .map(|identifier| self.config.to_subject(identifier))
            .transpose()?;
        let subjects = resolve_subjects(graph, identifier.as_ref(), schema)?;
        debug!(subjects = subjects.len(), schema = schema.is_some(), "decoding graph");

        subjects
            .iter()
            .map(|subject| {
                let attributes = fold_statements(subject, graph.predicate_objects(subject), schema)?;
                Ok(attributes.into_builtin(&self.config.id_key, subject))
            })
            .collect()
    }

    /// Decode one typed record, by default under its type's own schema
    pub fn to_struct<T: LinkedData>(
        &self,
        graph: &Graph,
        identifier: &str,
        schema: Option<&Schema>,
    ) -> MappingResult<T> {
        self.to_record(graph, identifier, schema.unwrap_or_else(|| T::schema()))
    }

    /// Decode one record of any deserializable type under `schema`
    pub fn to_record<T: DeserializeOwned>(
        &self,
        graph: &Graph,
        identifier: &str,
        schema: &Schema,
    ) -> MappingResult<T> {
        if identifier.is_empty() {
            return Err(MappingError::SubjectNotFound(String::new()));
        }
        let mapping = self
            .to_builtin(graph, Some(identifier), Some(schema))?
            .into_iter()
            .next()
            .ok_or_else(|| MappingError::SubjectNotFound(identifier.to_string()))?;
        codec::convert_to_type(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{rdf_type, Literal, NamedNode, RdfPredicate, RdfSubject};
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    impl LinkedData for Named {
        fn schema() -> &'static Schema {
            static SCHEMA: OnceLock<Schema> = OnceLock::new();
            SCHEMA.get_or_init(schema)
        }
    }

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn subject(iri: &str) -> RdfSubject {
        node(iri).into()
    }

    fn pred(iri: &str) -> RdfPredicate {
        RdfPredicate::new(iri).unwrap()
    }

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.add(subject("ex:alice"), rdf_type(), node("ex:Person"));
        graph.add(subject("ex:alice"), pred("ex:name"), Literal::new_simple_literal("Alice"));
        graph.add(subject("ex:alice"), pred("ex:knows"), node("ex:bob"));
        graph.add(subject("ex:bob"), rdf_type(), node("ex:Person"));
        graph.add(subject("ex:bob"), pred("ex:name"), Literal::new_simple_literal("Bob"));
        graph.add(subject("ex:acme"), rdf_type(), node("ex:Company"));
        graph
    }

    fn schema() -> Schema {
        Schema::builder("ex:Person")
            .field("name", "ex:name")
            .repeated_relation("friends", "ex:knows")
            .build()
            .unwrap()
    }

    #[test]
    fn test_decode_without_schema() {
        let mappings = Mapper::default().to_builtin(&sample(), None, None).unwrap();
        assert_eq!(mappings.len(), 3);
        assert_eq!(
            Value::Object(mappings[0].clone()),
            json!({"id": "ex:alice", "ex:name": "Alice", "ex:knows": "ex:bob"})
        );
        assert_eq!(Value::Object(mappings[2].clone()), json!({"id": "ex:acme"}));
    }

    #[test]
    fn test_decode_by_type() {
        let mappings = Mapper::default()
            .to_builtin(&sample(), None, Some(&schema()))
            .unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(
            Value::Object(mappings[1].clone()),
            json!({"id": "ex:bob", "name": "Bob"})
        );
    }

    #[test]
    fn test_decode_empty_selection() {
        let schema = Schema::builder("ex:Robot").build().unwrap();
        let mappings = Mapper::default()
            .to_builtin(&sample(), None, Some(&schema))
            .unwrap();
        assert!(mappings.is_empty());
    }

    #[test]
    fn test_decode_type_mismatch() {
        let result = Mapper::default().to_builtin(&sample(), Some("ex:acme"), Some(&schema()));
        assert!(matches!(result, Err(MappingError::TypeMismatch { .. })));
    }

    #[test]
    fn test_empty_identifier_selects_by_type() {
        let mapper = Mapper::default();
        let all = mapper.to_builtin(&sample(), Some(""), Some(&schema())).unwrap();
        assert_eq!(all.len(), 2);

        let missing: MappingResult<Named> = mapper.to_record(&sample(), "", &schema());
        assert!(matches!(missing, Err(MappingError::SubjectNotFound(id)) if id.is_empty()));
    }

    #[test]
    fn test_to_struct_with_borrowed_schema() {
        let narrow = Schema::builder("ex:Person")
            .field("name", "ex:name")
            .relation("friends", "ex:knows")
            .build()
            .unwrap();

        let bob: Named = Mapper::default()
            .to_struct(&sample(), "ex:bob", Some(&narrow))
            .unwrap();
        assert_eq!(bob.name, "Bob");

        let alice: Named = Mapper::default().to_struct(&sample(), "ex:alice", None).unwrap();
        assert_eq!(alice.name, "Alice");
    }

    #[test]
    fn test_to_record() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Person {
            id: String,
            name: String,
            #[serde(default)]
            friends: Vec<String>,
        }

        let alice: Person = Mapper::default()
            .to_record(&sample(), "ex:alice", &schema())
            .unwrap();
        assert_eq!(
            alice,
            Person {
                id: "ex:alice".to_string(),
                name: "Alice".to_string(),
                friends: vec!["ex:bob".to_string()],
            }
        );

        let missing: MappingResult<Person> =
            Mapper::default().to_record(&sample(), "ex:carol", &schema());
        assert!(matches!(missing, Err(MappingError::SubjectNotFound(_))));
    }
}
