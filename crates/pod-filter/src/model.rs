//! Entity-model contract consumed by the filter compilers.
//!
//! The compilers never own pods or networks. They read them through the
//! [`Pod`], [`Container`] and [`NetworkRegistry`] traits, so any runtime that
//! can answer these questions can be filtered. Accessors that may fail return
//! a [`LookupError`]; predicates treat every such failure as "no match".

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for entity-model lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors reported by pod and container accessors at evaluation time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The pod has no infra container.
    #[error("pod {pod} has no infra container")]
    NoInfraContainer {
        /// The pod identifier.
        pod: String,
    },

    /// The underlying state could not be read.
    #[error("failed to read {what}: {message}")]
    Unavailable {
        /// What was being read (e.g. "container states").
        what: String,
        /// Why it failed.
        message: String,
    },
}

impl LookupError {
    /// Creates an unavailable-state error.
    pub fn unavailable(what: impl Into<String>, message: impl Into<String>) -> Self {
        LookupError::Unavailable {
            what: what.into(),
            message: message.into(),
        }
    }
}

/// Errors reported by a [`NetworkRegistry`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No network matches the given name or ID.
    #[error("{0}: no such network")]
    NoSuchNetwork(String),

    /// An ID prefix matched more than one network.
    #[error("more than one result for network ID {0}")]
    Ambiguous(String),

    /// The registry could not be queried.
    #[error("network registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    /// Returns true if this is the "not found" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NoSuchNetwork(_))
    }
}

/// Lifecycle state of a single container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Unknown,
    Configured,
    Created,
    Running,
    Stopped,
    Paused,
    Exited,
    Removing,
    Stopping,
}

impl ContainerState {
    /// Returns the lowercase name of the state as reported by the runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Unknown => "unknown",
            ContainerState::Configured => "configured",
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Stopped => "stopped",
            ContainerState::Paused => "paused",
            ContainerState::Exited => "exited",
            ContainerState::Removing => "removing",
            ContainerState::Stopping => "stopping",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A network as resolved by a [`NetworkRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Canonical network name.
    pub name: String,
    /// Full network ID.
    pub id: String,
}

/// A child container of a pod.
pub trait Container {
    /// Full container ID.
    fn id(&self) -> &str;

    /// Container name.
    fn name(&self) -> &str;

    /// Names of the networks this container is attached to.
    fn networks(&self) -> LookupResult<Vec<String>>;
}

/// A pod: a group of containers filtered as one entity.
pub trait Pod {
    /// The container handle type returned by this pod.
    type Container: Container;

    /// Full pod ID.
    fn id(&self) -> &str;

    /// Pod name.
    fn name(&self) -> &str;

    /// Creation time of the pod.
    fn created_at(&self) -> DateTime<Utc>;

    /// Pod labels.
    fn labels(&self) -> &BTreeMap<String, String>;

    /// IDs of all containers in the pod, infra included.
    fn container_ids(&self) -> LookupResult<Vec<String>>;

    /// Handles for all containers in the pod, infra included.
    fn containers(&self) -> LookupResult<Vec<Self::Container>>;

    /// Current state of every container in the pod.
    fn container_states(&self) -> LookupResult<Vec<ContainerState>>;

    /// Aggregate pod status, e.g. `Running` or `Degraded`.
    fn status(&self) -> LookupResult<String>;

    /// The infra container owning the pod's network namespace.
    fn infra_container(&self) -> LookupResult<Self::Container>;
}

/// Resolves user-supplied network names or IDs to canonical networks.
pub trait NetworkRegistry {
    /// Looks up a network by name, full ID or unique ID prefix.
    fn inspect(&self, name_or_id: &str) -> Result<Network, RegistryError>;
}

impl<R: NetworkRegistry + ?Sized> NetworkRegistry for &R {
    fn inspect(&self, name_or_id: &str) -> Result<Network, RegistryError> {
        (**self).inspect(name_or_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_state_display_is_lowercase() {
        assert_eq!(ContainerState::Configured.to_string(), "configured");
        assert_eq!(ContainerState::Exited.to_string(), "exited");
    }

    #[test]
    fn test_container_state_serde_lowercase() {
        let state: ContainerState = serde_json::from_str("\"stopping\"").unwrap();
        assert_eq!(state, ContainerState::Stopping);
        assert_eq!(
            serde_json::to_string(&ContainerState::Paused).unwrap(),
            "\"paused\""
        );
    }

    #[test]
    fn test_registry_error_not_found() {
        assert!(RegistryError::NoSuchNetwork("x".into()).is_not_found());
        assert!(!RegistryError::Ambiguous("ab".into()).is_not_found());
        assert!(!RegistryError::Unavailable("down".into()).is_not_found());
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::unavailable("container states", "runtime gone");
        assert_eq!(
            err.to_string(),
            "failed to read container states: runtime gone"
        );
        let err = LookupError::NoInfraContainer { pod: "abc".into() };
        assert_eq!(err.to_string(), "pod abc has no infra container");
    }
}
