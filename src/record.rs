//! Record access
//!
//! The encoder reads records through [`FieldReadable`], so it does not care
//! whether a record is a loose JSON mapping or a typed struct. The adapter is
//! chosen when the record is wrapped, never by inspecting it later.

use crate::codec;
use crate::error::MappingResult;
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Structural read access to a record's attributes
pub trait FieldReadable {
    /// Value of the named attribute.
    ///
    /// `None` means the record has no such attribute; `Some(Value::Null)`
    /// means it has one and it is empty.
    fn get(&self, name: &str) -> Option<Value>;

    /// Schema the record declares for itself, if any
    fn schema(&self) -> Option<&Schema> {
        None
    }
}

impl FieldReadable for Map<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        Map::get(self, name).cloned()
    }
}

impl FieldReadable for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }
}

impl FieldReadable for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned()
    }
}

impl<R: FieldReadable + ?Sized> FieldReadable for &R {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }

    fn schema(&self) -> Option<&Schema> {
        (**self).schema()
    }
}

/// A typed record that knows its own schema
///
/// Implementations usually keep the schema in a `OnceLock`:
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use std::sync::OnceLock;
/// use triplemap::{LinkedData, Schema};
///
/// #[derive(Serialize, Deserialize)]
/// struct Person {
///     id: String,
///     name: String,
/// }
///
/// impl LinkedData for Person {
///     fn schema() -> &'static Schema {
///         static SCHEMA: OnceLock<Schema> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             Schema::builder("foaf:Person")
///                 .field("name", "foaf:name")
///                 .build()
///                 .expect("valid schema")
///         })
///     }
/// }
/// ```
pub trait LinkedData: Serialize + DeserializeOwned {
    fn schema() -> &'static Schema;
}

/// Struct-backed record adapter
///
/// Captures the attributes of any `Serialize` value once, at construction.
#[derive(Debug, Clone)]
pub struct StructRecord<'s> {
    attributes: Map<String, Value>,
    schema: Option<&'s Schema>,
}

impl<'s> StructRecord<'s> {
    /// Wrap a record that carries no schema of its own
    pub fn new<T: Serialize + ?Sized>(record: &T) -> MappingResult<Self> {
        Ok(Self {
            attributes: codec::to_builtins(record)?,
            schema: None,
        })
    }

    /// Wrap a record with an explicit self-declared schema
    pub fn with_schema<T: Serialize + ?Sized>(record: &T, schema: &'s Schema) -> MappingResult<Self> {
        Ok(Self {
            attributes: codec::to_builtins(record)?,
            schema: Some(schema),
        })
    }
}

impl StructRecord<'static> {
    /// Wrap a record carrying its type's schema
    pub fn linked<T: LinkedData>(record: &T) -> MappingResult<Self> {
        Self::with_schema(record, T::schema())
    }
}

impl FieldReadable for StructRecord<'_> {
    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn schema(&self) -> Option<&Schema> {
        self.schema
    }
}

/// First non-null identifier attribute among `keys`, in order
pub(crate) fn find_identifier<R: FieldReadable + ?Sized>(
    record: &R,
    keys: &[String],
) -> Option<Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| !value.is_null())
}
