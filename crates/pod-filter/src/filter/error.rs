//! Error types for filter compilation.

use thiserror::Error;

use crate::model::RegistryError;

/// A specialized Result type for filter compilation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that reject a filter before any pod is evaluated.
///
/// Evaluation never fails: a predicate that cannot read what it needs
/// simply does not match.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter family is not one of the recognized names.
    #[error("invalid filter: {family}")]
    UnknownFamily {
        /// The unrecognized family name.
        family: String,
        /// The closest recognized family, if any is close enough.
        suggestion: Option<String>,
    },

    /// A `ctr-status` value is outside the container status vocabulary.
    #[error("{value} is not a valid status")]
    InvalidContainerStatus {
        /// The rejected value.
        value: String,
    },

    /// A `status` value is outside the pod status vocabulary.
    #[error("{value} is not a valid pod status")]
    InvalidPodStatus {
        /// The rejected value.
        value: String,
    },

    /// Resolving a `network` value failed for a reason other than "not found".
    #[error(transparent)]
    Network(#[from] RegistryError),
}

impl FilterError {
    /// Creates an unknown family error.
    pub fn unknown_family(family: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownFamily {
            family: family.into(),
            suggestion,
        }
    }

    /// Creates an invalid container status error.
    pub fn invalid_container_status(value: impl Into<String>) -> Self {
        FilterError::InvalidContainerStatus {
            value: value.into(),
        }
    }

    /// Creates an invalid pod status error.
    pub fn invalid_pod_status(value: impl Into<String>) -> Self {
        FilterError::InvalidPodStatus {
            value: value.into(),
        }
    }

    /// Returns the suggested family name for an unknown family error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            FilterError::UnknownFamily { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}
