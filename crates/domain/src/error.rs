//! Unified error type for the domain layer.

use thiserror::Error;

/// Errors raised by domain rules and value-object construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Input violates a rule the caller could have checked
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A record or template could not be found
    #[error("Not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Stored or incoming data could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
