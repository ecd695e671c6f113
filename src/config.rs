//! Mapper configuration
//!
//! Everything here has a sensible default; a YAML document only needs the
//! keys it wants to change:
//!
//! ```yaml
//! identifier_keys: [ID, id]
//! id_key: id
//! base_iri: http://example.org/
//! ```

use crate::error::{MappingError, MappingResult};
use crate::rdf::{BlankNode, NamedNode, RdfSubject};
use oxiri::Iri;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML
    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Base IRI that cannot be resolved against
    #[error("Invalid base IRI {iri}: {reason}")]
    InvalidBaseIri { iri: String, reason: String },

    /// Empty list of identifier attribute names
    #[error("identifier_keys must name at least one attribute")]
    NoIdentifierKeys,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How records are read and how identifiers become graph references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Attribute names holding the record identifier, in priority order
    pub identifier_keys: Vec<String>,

    /// Key under which decoded attribute mappings carry the subject identifier
    pub id_key: String,

    /// Base against which relative identifiers are resolved
    pub base_iri: Option<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            identifier_keys: vec!["ID".to_string(), "id".to_string()],
            id_key: "id".to_string(),
            base_iri: None,
        }
    }
}

impl MappingConfig {
    /// Default configuration with a base IRI
    pub fn with_base_iri(base_iri: impl Into<String>) -> ConfigResult<Self> {
        let config = Self {
            base_iri: Some(base_iri.into()),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from YAML
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if self.identifier_keys.is_empty() {
            return Err(ConfigError::NoIdentifierKeys);
        }
        if let Some(base) = &self.base_iri {
            Iri::parse(base.as_str()).map_err(|e| ConfigError::InvalidBaseIri {
                iri: base.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Normalize a textual identifier to a graph reference.
    ///
    /// `_:label` becomes a blank node. Anything else must be an IRI, or a
    /// relative reference when a base IRI is configured.
    pub fn to_subject(&self, identifier: &str) -> MappingResult<RdfSubject> {
        if let Some(label) = identifier.strip_prefix("_:") {
            return Ok(BlankNode::with_label(label)?.into());
        }
        Ok(self.to_named_node(identifier)?.into())
    }

    fn to_named_node(&self, identifier: &str) -> MappingResult<NamedNode> {
        let Some(base) = &self.base_iri else {
            return Ok(NamedNode::new(identifier)?);
        };
        if Iri::parse(identifier).is_ok() {
            return Ok(NamedNode::new(identifier)?);
        }
        let resolved = Iri::parse(base.as_str())
            .and_then(|base| base.resolve(identifier))
            .map_err(|e| {
                MappingError::InvalidIri(crate::rdf::RdfError::InvalidIri(format!(
                    "{} (against {}): {}",
                    identifier, base, e
                )))
            })?;
        Ok(NamedNode::new(resolved.as_str())?)
    }
}
