//! RDF namespace and prefix management
//!
//! Prefixes are used when schemas are written by hand: `foaf:name` reads
//! better than the full IRI. The vocabulary helpers at the bottom name the
//! handful of terms the mapping layer itself depends on.

use super::types::{NamedNode, RdfPredicate};
use indexmap::IndexMap;
use oxrdf::vocab::{rdf, xsd};
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not a compact IRI
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace manager with common prefixes
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in registration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self::empty();

        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr.add_prefix("schema", "https://schema.org/");

        mgr
    }

    /// Create a manager without any registered prefix
    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Add (or replace) a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidIri(compact_iri.to_string()))?;
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Expand `value` when its prefix is registered, otherwise return it as is.
    ///
    /// Absolute IRIs (`http://...`) and CURIEs with an unknown prefix pass
    /// through untouched.
    pub fn resolve(&self, value: &str) -> String {
        if value.contains("://") {
            return value.to_string();
        }
        self.expand(value).unwrap_or_else(|_| value.to_string())
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `rdf:type`
pub fn rdf_type() -> RdfPredicate {
    NamedNode::from(rdf::TYPE).into()
}

/// `rdf:JSON`
pub fn rdf_json() -> NamedNode {
    NamedNode::from(oxrdf::NamedNode::new_unchecked(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON",
    ))
}

/// `xsd:string`, the datatype of plain literals
pub fn xsd_string() -> NamedNode {
    NamedNode::from(xsd::STRING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefixes() {
        let mgr = NamespaceManager::new();

        assert_eq!(
            mgr.get_iri("rdf").unwrap(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        );
        assert_eq!(mgr.get_iri("xsd").unwrap(), "http://www.w3.org/2001/XMLSchema#");
        assert!(mgr.get_iri("ex").is_err());
    }

    #[test]
    fn test_expand() {
        let mgr = NamespaceManager::new();

        assert_eq!(mgr.expand("foaf:name").unwrap(), "http://xmlns.com/foaf/0.1/name");
        assert_eq!(
            mgr.expand("rdf:type").unwrap(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert!(matches!(mgr.expand("nocolon"), Err(PrefixError::InvalidIri(_))));
    }

    #[test]
    fn test_resolve_passes_unknown_through() {
        let mgr = NamespaceManager::new();

        assert_eq!(mgr.resolve("xsd:integer"), "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(mgr.resolve("ex:alice"), "ex:alice");
        assert_eq!(mgr.resolve("http://example.org/a"), "http://example.org/a");
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut mgr = NamespaceManager::empty();
        mgr.add_prefix("ex", "http://example.org/");
        mgr.add_prefix("people", "http://example.org/people/");

        assert_eq!(
            mgr.compact("http://example.org/people/alice"),
            Some("people:alice".to_string())
        );
        assert_eq!(mgr.compact("http://other.org/x"), None);
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(
            rdf_type().as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(xsd_string().as_str(), "http://www.w3.org/2001/XMLSchema#string");
    }
}
