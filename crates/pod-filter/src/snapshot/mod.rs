//! In-memory pod snapshots.
//!
//! A [`Snapshot`] is a point-in-time copy of pods and networks, typically
//! loaded from JSON with [`SnapshotStore`]. It implements the entity-model
//! traits so filters can run against it without a live runtime.

mod store;

pub use store::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult};

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Container, ContainerState, LookupError, LookupResult, Network, NetworkRegistry, Pod,
    RegistryError,
};

/// A point-in-time copy of pods and the networks they can attach to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pods, in listing order.
    #[serde(default)]
    pub pods: Vec<PodSnapshot>,

    /// Known networks.
    #[serde(default)]
    pub networks: Vec<NetworkSnapshot>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NetworkRegistry for Snapshot {
    /// Resolves by exact name, then exact ID, then unique ID prefix.
    fn inspect(&self, name_or_id: &str) -> Result<Network, RegistryError> {
        let exact = self
            .networks
            .iter()
            .find(|n| n.name == name_or_id)
            .or_else(|| self.networks.iter().find(|n| n.id == name_or_id));
        if let Some(net) = exact {
            return Ok(net.into());
        }

        let mut candidates = self
            .networks
            .iter()
            .filter(|n| !name_or_id.is_empty() && n.id.starts_with(name_or_id));
        match (candidates.next(), candidates.next()) {
            (Some(net), None) => Ok(net.into()),
            (Some(_), Some(_)) => Err(RegistryError::Ambiguous(name_or_id.to_string())),
            (None, _) => Err(RegistryError::NoSuchNetwork(name_or_id.to_string())),
        }
    }
}

/// A network known to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub name: String,
    pub id: String,
}

impl From<&NetworkSnapshot> for Network {
    fn from(net: &NetworkSnapshot) -> Self {
        Network {
            name: net.name.clone(),
            id: net.id.clone(),
        }
    }
}

/// A pod and its containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodSnapshot {
    pub id: String,
    pub name: String,
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// All containers, infra included.
    #[serde(default)]
    pub containers: Vec<ContainerSnapshot>,
}

impl PodSnapshot {
    /// Status derived from the states of the pod's containers.
    pub fn derived_status(&self) -> PodStatus {
        let states: Vec<ContainerState> = self.containers.iter().map(|c| c.state).collect();
        PodStatus::from_container_states(&states)
    }
}

impl Pod for PodSnapshot {
    type Container = ContainerSnapshot;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created
    }

    fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    fn container_ids(&self) -> LookupResult<Vec<String>> {
        Ok(self.containers.iter().map(|c| c.id.clone()).collect())
    }

    fn containers(&self) -> LookupResult<Vec<ContainerSnapshot>> {
        Ok(self.containers.clone())
    }

    fn container_states(&self) -> LookupResult<Vec<ContainerState>> {
        Ok(self.containers.iter().map(|c| c.state).collect())
    }

    fn status(&self) -> LookupResult<String> {
        Ok(self.derived_status().to_string())
    }

    fn infra_container(&self) -> LookupResult<ContainerSnapshot> {
        self.containers
            .iter()
            .find(|c| c.infra)
            .cloned()
            .ok_or_else(|| LookupError::NoInfraContainer {
                pod: self.id.clone(),
            })
    }
}

/// A container inside a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: String,
    pub state: ContainerState,

    /// Whether this is the pod's infra container.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub infra: bool,

    /// Names of attached networks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
}

impl Container for ContainerSnapshot {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn networks(&self) -> LookupResult<Vec<String>> {
        Ok(self.networks.clone())
    }
}

/// Aggregate status of a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodStatus {
    Created,
    Error,
    Exited,
    Paused,
    Running,
    Degraded,
    Stopped,
}

impl PodStatus {
    /// Derives the pod status from its container states.
    ///
    /// - no containers: `Created`
    /// - some but not all running: `Degraded`
    /// - all running, all paused or all stopped: `Running`, `Paused`, `Exited`
    /// - otherwise any stopped: `Stopped`; any in an unexpected state: `Error`
    /// - otherwise `Created`
    pub fn from_container_states(states: &[ContainerState]) -> Self {
        let total = states.len();
        if total == 0 {
            return PodStatus::Created;
        }

        let (mut running, mut stopped, mut paused, mut errored) = (0, 0, 0, 0);
        for state in states {
            match state {
                ContainerState::Running | ContainerState::Stopping => running += 1,
                ContainerState::Exited | ContainerState::Stopped => stopped += 1,
                ContainerState::Paused => paused += 1,
                ContainerState::Created | ContainerState::Configured => {}
                ContainerState::Unknown | ContainerState::Removing => errored += 1,
            }
        }

        if running > 0 && running < total {
            PodStatus::Degraded
        } else if running == total {
            PodStatus::Running
        } else if paused == total {
            PodStatus::Paused
        } else if stopped == total {
            PodStatus::Exited
        } else if stopped > 0 {
            PodStatus::Stopped
        } else if errored > 0 {
            PodStatus::Error
        } else {
            PodStatus::Created
        }
    }

    /// The status as reported by the runtime, e.g. `Running`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PodStatus::Created => "Created",
            PodStatus::Error => "Error",
            PodStatus::Exited => "Exited",
            PodStatus::Paused => "Paused",
            PodStatus::Running => "Running",
            PodStatus::Degraded => "Degraded",
            PodStatus::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for PodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ContainerState::*;

    fn network(name: &str, id: &str) -> NetworkSnapshot {
        NetworkSnapshot {
            name: name.to_string(),
            id: id.to_string(),
        }
    }

    fn container(id: &str, state: ContainerState, infra: bool) -> ContainerSnapshot {
        ContainerSnapshot {
            id: id.to_string(),
            name: format!("ctr-{id}"),
            state,
            infra,
            networks: vec![],
        }
    }

    fn snapshot_with_networks() -> Snapshot {
        Snapshot {
            pods: vec![],
            networks: vec![
                network("podman", "2f259bab93aa"),
                network("backend", "2f3c0d1e8b7a"),
                network("frontend", "9e8d7c6b5a4f"),
            ],
        }
    }

    // ==================== Registry Tests ====================

    #[test]
    fn test_inspect_by_name_and_id() {
        let snapshot = snapshot_with_networks();
        assert_eq!(snapshot.inspect("backend").unwrap().name, "backend");
        assert_eq!(snapshot.inspect("9e8d7c6b5a4f").unwrap().name, "frontend");
    }

    #[test]
    fn test_inspect_by_unique_id_prefix() {
        let snapshot = snapshot_with_networks();
        assert_eq!(snapshot.inspect("9e8").unwrap().name, "frontend");
        assert_eq!(snapshot.inspect("2f2").unwrap().name, "podman");
    }

    #[test]
    fn test_inspect_prefers_name_over_id() {
        // "2f3c0d1e8b7a" is both the ID of "backend" and the name of a later network
        let mut snapshot = snapshot_with_networks();
        snapshot.networks.push(network("2f3c0d1e8b7a", "77aa88bb99cc"));
        assert_eq!(snapshot.inspect("2f3c0d1e8b7a").unwrap().id, "77aa88bb99cc");

        snapshot.networks.reverse();
        assert_eq!(snapshot.inspect("2f3c0d1e8b7a").unwrap().id, "77aa88bb99cc");
        assert_eq!(snapshot.inspect("backend").unwrap().id, "2f3c0d1e8b7a");
    }

    #[test]
    fn test_inspect_ambiguous_prefix() {
        let snapshot = snapshot_with_networks();
        assert_eq!(
            snapshot.inspect("2f"),
            Err(RegistryError::Ambiguous("2f".to_string()))
        );
    }

    #[test]
    fn test_inspect_missing() {
        let snapshot = snapshot_with_networks();
        assert_eq!(
            snapshot.inspect("ghost"),
            Err(RegistryError::NoSuchNetwork("ghost".to_string()))
        );
        assert!(snapshot.inspect("").unwrap_err().is_not_found());
    }

    // ==================== Status Tests ====================

    #[test]
    fn test_status_without_containers_is_created() {
        assert_eq!(PodStatus::from_container_states(&[]), PodStatus::Created);
    }

    #[test]
    fn test_status_derivation() {
        let cases: [(&[ContainerState], PodStatus); 9] = [
            (&[Running, Running], PodStatus::Running),
            (&[Running, Stopping], PodStatus::Running),
            (&[Running, Exited], PodStatus::Degraded),
            (&[Running, Created], PodStatus::Degraded),
            (&[Paused, Paused], PodStatus::Paused),
            (&[Exited, Stopped], PodStatus::Exited),
            (&[Exited, Created], PodStatus::Stopped),
            (&[Unknown, Created], PodStatus::Error),
            (&[Configured, Created], PodStatus::Created),
        ];
        for (states, expected) in cases {
            assert_eq!(
                PodStatus::from_container_states(states),
                expected,
                "{states:?}"
            );
        }
    }

    // ==================== Pod Tests ====================

    #[test]
    fn test_pod_accessors() {
        let pod = PodSnapshot {
            id: "abc123".to_string(),
            name: "web".to_string(),
            created: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            labels: BTreeMap::new(),
            containers: vec![container("c1", Running, true), container("c2", Exited, false)],
        };

        assert_eq!(pod.container_ids().unwrap(), vec!["c1", "c2"]);
        assert_eq!(pod.container_states().unwrap(), vec![Running, Exited]);
        assert_eq!(pod.status().unwrap(), "Degraded");
        assert_eq!(pod.infra_container().unwrap().id, "c1");
    }

    #[test]
    fn test_pod_without_infra() {
        let pod = PodSnapshot {
            id: "abc123".to_string(),
            name: "web".to_string(),
            created: DateTime::from_timestamp(0, 0).unwrap(),
            labels: BTreeMap::new(),
            containers: vec![container("c1", Running, false)],
        };
        assert_eq!(
            pod.infra_container().unwrap_err(),
            LookupError::NoInfraContainer {
                pod: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_minimal_pod() {
        let json = r#"{
            "id": "abc",
            "name": "web",
            "created": "2024-05-01T10:00:00Z"
        }"#;
        let pod: PodSnapshot = serde_json::from_str(json).unwrap();
        assert!(pod.labels.is_empty());
        assert!(pod.containers.is_empty());
        assert_eq!(pod.derived_status(), PodStatus::Created);
    }

    #[test]
    fn test_serialize_skips_defaults() {
        let json = serde_json::to_string(&container("c1", Running, false)).unwrap();
        assert!(!json.contains("infra"));
        assert!(!json.contains("networks"));
    }
}
