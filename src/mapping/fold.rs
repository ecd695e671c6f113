//! Statement folding: a subject's triples → one attribute mapping

use crate::codec;
use crate::error::{MappingError, MappingResult};
use crate::rdf::{rdf_type, RdfObject, RdfPredicate, RdfSubject};
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// How many values a folded attribute may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Declared single-valued
    One,
    /// Declared repeatable: always a sequence
    Many,
    /// No declaration: a sequence only once a second value shows up
    Inferred,
}

/// Values gathered for one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedValue {
    arity: Arity,
    values: Vec<Value>,
}

impl FoldedValue {
    fn new(arity: Arity) -> Self {
        Self {
            arity,
            values: Vec::new(),
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Collapse to the interchange shape: a scalar for single values, an
    /// array for repeatable ones or inferred ones that saw several values.
    pub fn into_value(mut self) -> Value {
        match self.arity {
            Arity::Many => Value::Array(self.values),
            Arity::One | Arity::Inferred if self.values.len() == 1 => self.values.remove(0),
            Arity::One | Arity::Inferred => Value::Array(self.values),
        }
    }
}

/// Attribute mapping of one subject, keyed by field name (or predicate IRI
/// when no schema is used), in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, FoldedValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FoldedValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain JSON mapping, prefixed with `id_key: identifier`
    pub fn into_builtin(self, id_key: &str, identifier: &RdfSubject) -> Map<String, Value> {
        let mut map = Map::with_capacity(self.entries.len() + 1);
        map.insert(id_key.to_string(), Value::String(identifier.to_id_string()));
        for (key, folded) in self.entries {
            map.insert(key, folded.into_value());
        }
        map
    }
}

/// Fold `(predicate, object)` pairs of `subject` into an attribute mapping.
///
/// `rdf:type` statements are skipped. Without a schema values are grouped by
/// predicate IRI. With a schema every predicate must map to a field;
/// repeatable fields always accumulate, and a second value for any other
/// field is a cardinality violation.
pub fn fold_statements<'a, I>(
    subject: &RdfSubject,
    statements: I,
    schema: Option<&Schema>,
) -> MappingResult<Attributes>
where
    I: IntoIterator<Item = (&'a RdfPredicate, &'a RdfObject)>,
{
    let type_pred = rdf_type();
    let mut attrs = Attributes::new();

    for (predicate, object) in statements {
        if *predicate == type_pred {
            continue;
        }
        let value = codec::object_to_value(object);

        let Some(schema) = schema else {
            attrs
                .entries
                .entry(predicate.as_str().to_string())
                .or_insert_with(|| FoldedValue::new(Arity::Inferred))
                .values
                .push(value);
            continue;
        };

        let (field, info) =
            schema
                .field_for_predicate(predicate)
                .ok_or_else(|| MappingError::UnmappedPredicate {
                    subject: subject.to_id_string(),
                    predicate: predicate.as_str().to_string(),
                })?;
        let arity = if info.repeatable { Arity::Many } else { Arity::One };
        let slot = attrs
            .entries
            .entry(field.to_string())
            .or_insert_with(|| FoldedValue::new(arity));

        if arity == Arity::One && !slot.values.is_empty() {
            return Err(MappingError::CardinalityViolation {
                subject: subject.to_id_string(),
                field: field.to_string(),
            });
        }
        slot.values.push(value);
    }

    Ok(attrs)
}
