//! Mapping error taxonomy
//!
//! Every variant is a hard failure: it signals a schema or data contract
//! violation, never a transient condition, so nothing here is retried.

use thiserror::Error;

/// Errors raised while registering, encoding or decoding resources
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// Identity or reference URI is not absolute
    #[error("Relative URI '{uri}' in {type_name}.{member}")]
    RelativeUri {
        type_name: String,
        member: String,
        uri: String,
    },

    /// Readable property without a mutator (or the reverse)
    #[error("Property {type_name}.{member} has no matching accessor/mutator")]
    MissingCounterpart { type_name: String, member: String },

    /// Single-valued property received more than one triple
    #[error("Single-valued property {type_name}.{member} occurs more than once")]
    MisusedOccurs { type_name: String, member: String },

    /// Literal not parseable as the target primitive
    #[error("Cannot parse '{lexical}' as {target}")]
    Format { lexical: String, target: String },

    /// Property declaration is structurally invalid
    #[error("Invalid shape for {type_name}.{member}: {reason}")]
    InvalidShape {
        type_name: String,
        member: String,
        reason: String,
    },

    /// No literal, URI or nested-resource mapping exists for a value
    #[error("Unsupported value {value} for {target}")]
    UnsupportedValue { value: String, target: String },

    /// Broken rdf:List chain or container node
    #[error("Malformed container at {node}: {reason}")]
    MalformedContainer { node: String, reason: String },
}

pub type MappingResult<T> = Result<T, MappingError>;

impl MappingError {
    pub(crate) fn relative_uri(
        type_name: impl Into<String>,
        member: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        MappingError::RelativeUri {
            type_name: type_name.into(),
            member: member.into(),
            uri: uri.into(),
        }
    }

    pub(crate) fn format(lexical: impl Into<String>, target: impl Into<String>) -> Self {
        MappingError::Format {
            lexical: lexical.into(),
            target: target.into(),
        }
    }

    pub(crate) fn invalid_shape(
        type_name: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MappingError::InvalidShape {
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(value: impl Into<String>, target: impl Into<String>) -> Self {
        MappingError::UnsupportedValue {
            value: value.into(),
            target: target.into(),
        }
    }

    pub(crate) fn malformed(node: impl Into<String>, reason: impl Into<String>) -> Self {
        MappingError::MalformedContainer {
            node: node.into(),
            reason: reason.into(),
        }
    }
}
