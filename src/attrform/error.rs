//! # Errors
//!
//! Fatal conditions are typed values that propagate to the caller building the form.
//! Nothing in the library shows them to the user: presentation layers turn an
//! [`AttrFormError`] into an [`ErrorReport`] (title, message, cause) and decide how to
//! display it.
//!
//! Unsupported attribute types are *not* errors. The field renderer absorbs them into
//! placeholder fields, see [`crate::render`].

use serde::Serialize;
use std::io;
use thiserror::Error;

/// Failure while turning a source's attributes into a typed record.
///
/// Extraction is all-or-nothing: any of these aborts the whole pass.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("attribute '{name}' has {count} values, multiple items per field are not supported")]
    InputCardinality { name: String, count: usize },

    #[error("could not read attribute '{name}': {cause}")]
    Read { name: String, cause: io::Error },

    #[error("failed to enumerate attributes: {cause}")]
    Enumeration { cause: io::Error },
}

impl ExtractionError {
    /// The attribute the failure is about, if any.
    pub fn attr_name(&self) -> Option<&str> {
        match self {
            ExtractionError::InputCardinality { name, .. } => Some(name),
            ExtractionError::Read { name, .. } => Some(name),
            ExtractionError::Enumeration { .. } => None,
        }
    }
}

/// Failure while resolving a form template for a type.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A template exists for the type but could not be set up.
    #[error("template for '{type_id}' failed to initialize: {cause}")]
    Init { type_id: String, cause: String },
}

#[derive(Error, Debug)]
pub enum AttrFormError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Type lookup error: {0}")]
    TypeLookup(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttrFormError>;

/// User-facing description of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub title: String,
    pub message: String,
    pub cause: String,
}

impl ErrorReport {
    fn new(title: &str, message: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}

impl AttrFormError {
    /// Builds the title / message / cause triple shown to users.
    pub fn report(&self) -> ErrorReport {
        match self {
            AttrFormError::Extraction(ExtractionError::InputCardinality { name, count }) => {
                ErrorReport::new(
                    "Error setting up view",
                    format!(
                        "Could not process attribute '{}'. Multiple items per field not supported.",
                        name
                    ),
                    format!("{} values found", count),
                )
            }
            AttrFormError::Extraction(ExtractionError::Read { name, cause }) => ErrorReport::new(
                "Error opening file",
                format!("Failed to read attribute '{}' from file.", name),
                cause,
            ),
            AttrFormError::Extraction(ExtractionError::Enumeration { cause }) => {
                ErrorReport::new("Error opening file", "Failed to read file attributes.", cause)
            }
            AttrFormError::Template(TemplateError::Init { type_id, cause }) => ErrorReport::new(
                "Error",
                format!("Failed to set up view for type '{}'.", type_id),
                cause,
            ),
            AttrFormError::Schema(cause) => ErrorReport::new(
                "Type attribute info lookup error",
                "Could not load attribute info for file type.",
                cause,
            ),
            AttrFormError::TypeLookup(cause) => ErrorReport::new(
                "Type lookup error",
                "Could not identify type of file.",
                cause,
            ),
            AttrFormError::Config(cause) => {
                ErrorReport::new("Configuration error", "Could not load configuration.", cause)
            }
            AttrFormError::Io(cause) => {
                ErrorReport::new("Error opening file", "An I/O operation failed.", cause)
            }
            AttrFormError::Serialization(cause) => {
                ErrorReport::new("Error opening file", "Could not parse data.", cause)
            }
        }
    }
}
