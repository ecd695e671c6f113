//! Generic value codec
//!
//! Records travel through the mapper as `serde_json` values. This module
//! turns scalar values into RDF objects and RDF objects back into plain
//! JSON, and materializes typed records from attribute mappings.
//!
//! Extended scalar kinds (dates, times, uuids, decimals) have no JSON
//! representation of their own; they round-trip through the text form their
//! `serde` implementation produces. Byte blobs serialize as arrays of bytes;
//! under `xsd:base64Binary` or `xsd:hexBinary` they are stored as a single
//! encoded literal and come back as the same array.

use crate::error::{MappingError, MappingResult};
use crate::rdf::{rdf_json, xsd_string, Literal, NamedNode, RdfObject};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

const INTEGER_TYPES: &[&str] = &[
    "integer",
    "int",
    "long",
    "short",
    "byte",
    "nonNegativeInteger",
    "nonPositiveInteger",
    "positiveInteger",
    "negativeInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
];

/// Encodings of the binary datatypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryEncoding {
    Base64,
    Hex,
}

impl BinaryEncoding {
    fn of(datatype: &NamedNode) -> Option<Self> {
        match datatype.as_str().strip_prefix(XSD)? {
            "base64Binary" => Some(BinaryEncoding::Base64),
            "hexBinary" => Some(BinaryEncoding::Hex),
            _ => None,
        }
    }
}

/// Lexical form of a scalar JSON value, or `None` for null.
///
/// Nested objects are written as their JSON text.
pub fn lexical_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Literal for a scalar value under the declared datatype.
///
/// Objects declared as plain strings are tagged `rdf:JSON` instead, so they
/// can be told apart from text on the way back.
pub fn to_literal(value: &Value, datatype: &NamedNode) -> Option<Literal> {
    let lexical = match value {
        // xsd:decimal has no exponent notation
        Value::Number(n) if n.is_f64() && datatype.as_str().strip_prefix(XSD) == Some("decimal") => {
            n.as_f64()?.to_string()
        }
        _ => lexical_form(value)?,
    };
    let datatype = if value.is_object() && *datatype == xsd_string() {
        rdf_json()
    } else {
        datatype.clone()
    };
    Some(Literal::new_typed_literal(lexical, datatype))
}

/// Single binary literal for an array of bytes under a binary datatype.
///
/// Returns `None` when the datatype is not `xsd:base64Binary` or
/// `xsd:hexBinary`, or when the value is not an array of bytes.
pub fn to_binary_literal(value: &Value, datatype: &NamedNode) -> Option<Literal> {
    let encoding = BinaryEncoding::of(datatype)?;
    let Value::Array(items) = value else {
        return None;
    };
    let bytes = items
        .iter()
        .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect::<Option<Vec<u8>>>()?;
    let lexical = match encoding {
        BinaryEncoding::Base64 => STANDARD.encode(&bytes),
        BinaryEncoding::Hex => hex::encode_upper(&bytes),
    };
    Some(Literal::new_typed_literal(lexical, datatype.clone()))
}

/// Plain JSON value of an RDF object.
///
/// IRIs and blank nodes become their identifier text. Literals are coerced
/// by datatype: booleans, integers and floating point numbers become JSON
/// scalars when their lexical form allows it, `rdf:JSON` is parsed, binary
/// literals become byte arrays, and everything else stays text.
pub fn object_to_value(object: &RdfObject) -> Value {
    match object {
        RdfObject::NamedNode(n) => Value::String(n.as_str().to_string()),
        RdfObject::BlankNode(b) => Value::String(b.to_string()),
        RdfObject::Literal(l) => literal_to_value(l),
    }
}

fn literal_to_value(literal: &Literal) -> Value {
    let lexical = literal.value();
    if literal.language().is_some() {
        return Value::String(lexical.to_string());
    }

    let datatype = literal.datatype();
    if datatype == rdf_json() {
        return serde_json::from_str(lexical).unwrap_or_else(|_| Value::String(lexical.to_string()));
    }
    let Some(local) = datatype.as_str().strip_prefix(XSD) else {
        return Value::String(lexical.to_string());
    };

    if let Some(encoding) = BinaryEncoding::of(&datatype) {
        return decode_binary(lexical.trim(), encoding)
            .unwrap_or_else(|| Value::String(lexical.to_string()));
    }

    let coerced = match local {
        "boolean" => match lexical.trim() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        t if INTEGER_TYPES.contains(&t) => parse_integer(lexical.trim()),
        "double" | "float" => parse_double(lexical.trim()),
        "decimal" => parse_decimal(lexical.trim()),
        _ => None,
    };
    coerced.unwrap_or_else(|| Value::String(lexical.to_string()))
}

fn parse_integer(lexical: &str) -> Option<Value> {
    let unsigned = lexical.strip_prefix('+').unwrap_or(lexical);
    if let Ok(i) = unsigned.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    unsigned.parse::<u64>().ok().map(|u| Value::Number(u.into()))
}

fn parse_double(lexical: &str) -> Option<Value> {
    // Non-finite values have no JSON number
    let f = lexical.parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

fn parse_decimal(lexical: &str) -> Option<Value> {
    let f = lexical.parse::<f64>().ok()?;
    if f.to_string() != canonical_decimal(lexical)? {
        return None;
    }
    Number::from_f64(f).map(Value::Number)
}

/// Canonical `xsd:decimal` form, comparable with `f64`'s `Display`: no plus
/// sign, no redundant zeros, no trailing point.
fn canonical_decimal(lexical: &str) -> Option<String> {
    let (sign, digits) = match lexical.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", lexical.strip_prefix('+').unwrap_or(lexical)),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let int = match int.trim_start_matches('0') {
        "" => "0",
        int => int,
    };
    let frac = frac.trim_end_matches('0');
    Some(if frac.is_empty() {
        format!("{}{}", sign, int)
    } else {
        format!("{}{}.{}", sign, int, frac)
    })
}

fn decode_binary(lexical: &str, encoding: BinaryEncoding) -> Option<Value> {
    let bytes = match encoding {
        BinaryEncoding::Base64 => STANDARD.decode(lexical).ok()?,
        BinaryEncoding::Hex => hex::decode(lexical).ok()?,
    };
    Some(Value::Array(bytes.into_iter().map(Value::from).collect()))
}

/// Turn any serializable record into an attribute mapping
pub fn to_builtins<T: Serialize + ?Sized>(record: &T) -> MappingResult<Map<String, Value>> {
    match serde_json::to_value(record).map_err(MappingError::Serialization)? {
        Value::Object(map) => Ok(map),
        other => Err(MappingError::Serialization(serde::ser::Error::custom(format!(
            "expected a record, got {}",
            kind_name(&other)
        )))),
    }
}

/// Materialize a typed record from an attribute mapping.
///
/// Unknown keys are ignored unless the target type opts into
/// `#[serde(deny_unknown_fields)]`.
pub fn convert_to_type<T: DeserializeOwned>(mapping: Map<String, Value>) -> MappingResult<T> {
    serde_json::from_value(Value::Object(mapping)).map_err(MappingError::Decode)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
