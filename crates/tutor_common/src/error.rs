//! Error types for the tutor core.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn an ontology source into a [`Store`](crate::ontology::Store).
///
/// Every variant is fatal for a tutoring session: there is nothing to
/// query without a store.
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Ontology file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "Unsupported ontology format '{}' (expected .toml or .json): {}",
        .extension,
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed TOML ontology: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed JSON ontology: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate entity name '{0}'")]
    DuplicateName(String),

    #[error("Entity '{from}' references unknown individual '{target}' via {relation}")]
    UnknownReference {
        from: String,
        relation: &'static str,
        target: String,
    },

    #[error("Entity '{from}' references unknown class '{class}'")]
    UnknownClass { from: String, class: String },

    #[error("Entity with empty name in {0}")]
    EmptyName(&'static str),
}

impl OntologyError {
    /// Short machine-readable code, used in JSON error output
    pub fn code(&self) -> &'static str {
        match self {
            OntologyError::NotFound(_) => "not_found",
            OntologyError::UnsupportedFormat { .. } => "unsupported_format",
            OntologyError::Io(_) => "io",
            OntologyError::Toml(_) | OntologyError::Json(_) => "malformed",
            OntologyError::DuplicateName(_) => "duplicate_name",
            OntologyError::UnknownReference { .. } => "unknown_reference",
            OntologyError::UnknownClass { .. } => "unknown_class",
            OntologyError::EmptyName(_) => "empty_name",
        }
    }
}

/// Misuse of the tutoring session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No concept selected")]
    NoConceptSelected,

    #[error("Answer already submitted for this question")]
    AlreadySubmitted,
}

pub type Result<T, E = OntologyError> = std::result::Result<T, E>;
