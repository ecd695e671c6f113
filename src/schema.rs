//! Record schemas
//!
//! A [`Schema`] describes one record type: the RDF class its instances are
//! typed with and, for each field, the predicate it is stored under, the
//! kind of value it holds and whether it may hold more than one.
//!
//! Schemas are built once and shared read-only. The builder rejects a
//! predicate claimed by two fields, so the predicate → field inverse used
//! when decoding is always total and injective.

use crate::rdf::{xsd_string, NamedNode, NamespaceManager, RdfError, RdfPredicate};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Schema construction errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two fields share a name
    #[error("Field declared twice: {0}")]
    DuplicateField(String),

    /// Two fields map to the same predicate
    #[error("Predicate {predicate} is used by both {first} and {second}")]
    DuplicatePredicate {
        predicate: String,
        first: String,
        second: String,
    },

    /// Invalid IRI for the class, a predicate or a datatype
    #[error(transparent)]
    InvalidIri(#[from] RdfError),

    /// IO error while loading a schema document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed schema document
    #[error("Invalid schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// What a field's values are stored as
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Literal carrying the given datatype
    Literal(NamedNode),
    /// Identifier of another subject
    Relation,
}

impl ValueKind {
    pub fn is_relation(&self) -> bool {
        matches!(self, ValueKind::Relation)
    }
}

impl Default for ValueKind {
    fn default() -> Self {
        ValueKind::Literal(xsd_string())
    }
}

/// Per-field mapping metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Predicate the field is stored under
    pub predicate: RdfPredicate,
    /// Literal datatype or relation marker
    pub value_kind: ValueKind,
    /// Whether the field may hold more than one value
    pub repeatable: bool,
}

/// Static description of one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entity_type: NamedNode,
    fields: IndexMap<String, FieldInfo>,
    predicate_to_field: HashMap<RdfPredicate, String>,
}

impl Schema {
    /// Start building a schema for instances of `entity_type`
    pub fn builder(entity_type: &str) -> SchemaBuilder {
        SchemaBuilder::new(entity_type)
    }

    /// Load a schema document from YAML
    ///
    /// ```yaml
    /// entity_type: foaf:Person
    /// prefixes:
    ///   ex: http://example.org/
    /// fields:
    ///   name: { predicate: foaf:name }
    ///   age: { predicate: foaf:age, datatype: xsd:integer }
    ///   friends: { predicate: foaf:knows, relation: true, repeatable: true }
    /// ```
    pub fn from_yaml_str(input: &str) -> SchemaResult<Self> {
        let doc: SchemaDocument = serde_yaml::from_str(input)?;
        doc.into_schema()
    }

    /// Load a schema document from a YAML file
    pub fn from_yaml_path(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    /// RDF class of the described records
    pub fn entity_type(&self) -> &NamedNode {
        &self.entity_type
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldInfo)> {
        self.fields.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Metadata of a field by name
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Field stored under `predicate`
    pub fn field_for_predicate(&self, predicate: &RdfPredicate) -> Option<(&str, &FieldInfo)> {
        let name = self.predicate_to_field.get(predicate)?;
        let info = self.fields.get(name)?;
        Some((name.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`Schema`]
///
/// IRIs may be written as CURIEs for any prefix known to the builder's
/// [`NamespaceManager`]. Errors are deferred to [`SchemaBuilder::build`].
#[derive(Debug)]
pub struct SchemaBuilder {
    namespaces: NamespaceManager,
    entity_type: String,
    fields: Vec<(String, String, FieldKindSpec, bool)>,
}

#[derive(Debug)]
enum FieldKindSpec {
    Literal(String),
    Relation,
}

impl SchemaBuilder {
    fn new(entity_type: &str) -> Self {
        Self {
            namespaces: NamespaceManager::new(),
            entity_type: entity_type.to_string(),
            fields: Vec::new(),
        }
    }

    /// Register an extra prefix for CURIE expansion
    pub fn prefix(mut self, prefix: &str, iri: &str) -> Self {
        self.namespaces.add_prefix(prefix, iri);
        self
    }

    /// Single-valued `xsd:string` field
    pub fn field(self, name: &str, predicate: &str) -> Self {
        self.literal(name, predicate, "xsd:string")
    }

    /// Single-valued literal field
    pub fn literal(self, name: &str, predicate: &str, datatype: &str) -> Self {
        self.push(name, predicate, FieldKindSpec::Literal(datatype.to_string()), false)
    }

    /// Multi-valued literal field
    pub fn repeated_literal(self, name: &str, predicate: &str, datatype: &str) -> Self {
        self.push(name, predicate, FieldKindSpec::Literal(datatype.to_string()), true)
    }

    /// Single-valued relation field
    pub fn relation(self, name: &str, predicate: &str) -> Self {
        self.push(name, predicate, FieldKindSpec::Relation, false)
    }

    /// Multi-valued relation field
    pub fn repeated_relation(self, name: &str, predicate: &str) -> Self {
        self.push(name, predicate, FieldKindSpec::Relation, true)
    }

    fn push(mut self, name: &str, predicate: &str, kind: FieldKindSpec, repeatable: bool) -> Self {
        self.fields
            .push((name.to_string(), predicate.to_string(), kind, repeatable));
        self
    }

    /// Validate and freeze the schema
    pub fn build(self) -> SchemaResult<Schema> {
        let entity_type = NamedNode::new(&self.namespaces.resolve(&self.entity_type))?;
        let mut fields = IndexMap::with_capacity(self.fields.len());
        let mut predicate_to_field: HashMap<RdfPredicate, String> =
            HashMap::with_capacity(self.fields.len());

        for (name, predicate, kind, repeatable) in self.fields {
            let predicate = RdfPredicate::new(&self.namespaces.resolve(&predicate))?;
            let value_kind = match kind {
                FieldKindSpec::Literal(datatype) => {
                    ValueKind::Literal(NamedNode::new(&self.namespaces.resolve(&datatype))?)
                }
                FieldKindSpec::Relation => ValueKind::Relation,
            };

            if fields.contains_key(&name) {
                return Err(SchemaError::DuplicateField(name));
            }
            if let Some(first) = predicate_to_field.get(&predicate) {
                return Err(SchemaError::DuplicatePredicate {
                    predicate: predicate.as_str().to_string(),
                    first: first.clone(),
                    second: name,
                });
            }

            predicate_to_field.insert(predicate.clone(), name.clone());
            fields.insert(
                name,
                FieldInfo {
                    predicate,
                    value_kind,
                    repeatable,
                },
            );
        }

        Ok(Schema {
            entity_type,
            fields,
            predicate_to_field,
        })
    }
}

/// On-disk schema document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    entity_type: String,
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    fields: IndexMap<String, FieldDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDocument {
    predicate: String,
    #[serde(default)]
    datatype: Option<String>,
    #[serde(default)]
    relation: bool,
    #[serde(default)]
    repeatable: bool,
}

impl SchemaDocument {
    fn into_schema(self) -> SchemaResult<Schema> {
        let mut builder = Schema::builder(&self.entity_type);
        for (prefix, iri) in &self.prefixes {
            builder = builder.prefix(prefix, iri);
        }
        for (name, field) in self.fields {
            let kind = if field.relation {
                FieldKindSpec::Relation
            } else {
                FieldKindSpec::Literal(field.datatype.unwrap_or_else(|| "xsd:string".to_string()))
            };
            builder = builder.push(&name, &field.predicate, kind, field.repeatable);
        }
        builder.build()
    }
}
