//! Encoding: record → graph

use super::emit::emit_value;
use super::Mapper;
use crate::error::{MappingError, MappingResult};
use crate::rdf::{rdf_type, Graph, GraphName, RdfSubject};
use crate::record::{find_identifier, FieldReadable, LinkedData, StructRecord};
use crate::schema::Schema;
use serde_json::Value;
use tracing::debug;

impl Mapper {
    /// Encode a record into a fresh graph.
    ///
    /// The graph is named `identifier`, or a fresh blank node. An explicit
    /// `schema` wins over the one the record carries. On error nothing is
    /// returned, so no partial graph escapes.
    pub fn encode<R: FieldReadable + ?Sized>(
        &self,
        record: &R,
        schema: Option<&Schema>,
        identifier: Option<&str>,
    ) -> MappingResult<Graph> {
        let name = match identifier {
            Some(identifier) => GraphName::from(self.config.to_subject(identifier)?),
            None => GraphName::default(),
        };
        let mut graph = Graph::with_name(name);
        self.encode_into(record, schema, &mut graph)?;
        Ok(graph)
    }

    /// Encode a record into an existing graph.
    ///
    /// The record is checked against the schema before anything is written.
    /// Emission itself is not transactional: callers that need all-or-nothing
    /// behaviour should encode into a fresh graph and merge it on success.
    pub fn encode_into<R: FieldReadable + ?Sized>(
        &self,
        record: &R,
        schema: Option<&Schema>,
        graph: &mut Graph,
    ) -> MappingResult<()> {
        let schema = schema
            .or_else(|| record.schema())
            .ok_or(MappingError::MissingSchema)?;
        self.validate(record, schema)?;
        let subject = self.record_subject(record)?;

        let before = graph.len();
        graph.add(subject.clone(), rdf_type(), schema.entity_type().clone());
        for (name, info) in schema.fields() {
            let value = record
                .get(name)
                .ok_or_else(|| MappingError::MissingField(name.to_string()))?;
            emit_value(graph, &self.config, &subject, name, info, &value)?;
        }

        debug!(
            subject = %subject,
            entity_type = %schema.entity_type(),
            added = graph.len() - before,
            "encoded record"
        );
        Ok(())
    }

    /// Encode a typed record under its own schema
    pub fn encode_struct<T: LinkedData>(&self, record: &T) -> MappingResult<Graph> {
        self.encode(&StructRecord::linked(record)?, None, None)
    }

    /// Subject of a record, from the first non-null identifier attribute
    pub fn record_subject<R: FieldReadable + ?Sized>(&self, record: &R) -> MappingResult<RdfSubject> {
        let keys = &self.config.identifier_keys;
        match find_identifier(record, keys) {
            Some(Value::String(identifier)) => self.config.to_subject(&identifier),
            _ => Err(MappingError::IdentifierMissing(keys.clone())),
        }
    }

    /// Check that the record has every schema field and that relation fields
    /// hold identifiers.
    fn validate<R: FieldReadable + ?Sized>(&self, record: &R, schema: &Schema) -> MappingResult<()> {
        for (name, info) in schema.fields() {
            let value = record
                .get(name)
                .ok_or_else(|| MappingError::MissingField(name.to_string()))?;
            if info.value_kind.is_relation() {
                self.validate_relation(name, &value)?;
            }
        }
        Ok(())
    }

    fn validate_relation(&self, field: &str, value: &Value) -> MappingResult<()> {
        match value {
            Value::Null => Ok(()),
            Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.validate_relation(field, item)),
            Value::String(identifier) => self.config.to_subject(identifier).map(|_| ()),
            other => Err(MappingError::InvalidRelation {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}
