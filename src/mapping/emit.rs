//! Value emission: one field value → triples

use crate::codec;
use crate::config::MappingConfig;
use crate::error::{MappingError, MappingResult};
use crate::rdf::{Graph, RdfObject, RdfSubject, Triple};
use crate::schema::{FieldInfo, ValueKind};
use serde_json::Value;
use tracing::trace;

/// Emit the triples for one field value of `subject` into `graph`.
///
/// Nulls emit nothing. Arrays emit one triple per element under the same
/// predicate (strings are always scalars), except that an array of bytes in
/// a `xsd:base64Binary` / `xsd:hexBinary` field is one encoded literal.
/// Relation fields point at another subject; literal fields carry the
/// field's datatype. Cardinality is not checked here.
pub fn emit_value(
    graph: &mut Graph,
    config: &MappingConfig,
    subject: &RdfSubject,
    field: &str,
    info: &FieldInfo,
    value: &Value,
) -> MappingResult<()> {
    match value {
        // A repeatable field's own array lists values, never one blob
        Value::Array(items) if info.repeatable => {
            for item in items {
                emit_element(graph, config, subject, field, info, item)?;
            }
            Ok(())
        }
        value => emit_element(graph, config, subject, field, info, value),
    }
}

fn emit_element(
    graph: &mut Graph,
    config: &MappingConfig,
    subject: &RdfSubject,
    field: &str,
    info: &FieldInfo,
    value: &Value,
) -> MappingResult<()> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            if let ValueKind::Literal(datatype) = &info.value_kind {
                if let Some(literal) = codec::to_binary_literal(value, datatype) {
                    insert(graph, subject, info, literal.into());
                    return Ok(());
                }
            }
            for item in items {
                emit_element(graph, config, subject, field, info, item)?;
            }
            Ok(())
        }
        scalar => {
            let object = match &info.value_kind {
                ValueKind::Relation => relation_object(config, field, scalar)?,
                ValueKind::Literal(datatype) => match codec::to_literal(scalar, datatype) {
                    Some(literal) => literal.into(),
                    None => return Ok(()),
                },
            };
            insert(graph, subject, info, object);
            Ok(())
        }
    }
}

fn insert(graph: &mut Graph, subject: &RdfSubject, info: &FieldInfo, object: RdfObject) {
    let triple = Triple::new(subject.clone(), info.predicate.clone(), object);
    trace!(%triple, "emit");
    graph.insert(triple);
}

fn relation_object(config: &MappingConfig, field: &str, value: &Value) -> MappingResult<RdfObject> {
    match value {
        Value::String(identifier) => Ok(config.to_subject(identifier)?.into()),
        other => Err(MappingError::InvalidRelation {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}
