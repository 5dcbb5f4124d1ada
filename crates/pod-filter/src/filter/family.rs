//! The closed set of filter families.

use std::fmt;
use std::str::FromStr;

use strsim::levenshtein;

use super::error::FilterError;

/// Maximum Levenshtein distance to consider a family name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Names which matching discipline a filter request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterFamily {
    // ==================== Identity ====================
    /// Pod ID: hex prefix or regex.
    Id,

    /// Pod name: regex.
    Name,

    /// IDs of the pod's containers: hex prefix or regex.
    CtrIds,

    /// Names of the pod's containers: regex.
    CtrNames,

    // ==================== Aggregates ====================
    /// Number of containers in the pod.
    CtrNumber,

    /// State of any container in the pod.
    CtrStatus,

    /// Aggregate pod status.
    Status,

    // ==================== Metadata ====================
    /// Pod labels.
    Label,

    /// Pods created before an instant.
    Until,

    // ==================== Relations ====================
    /// Networks the pod's infra container is attached to.
    Network,
}

impl FilterFamily {
    /// Every family, in documentation order.
    pub const ALL: [FilterFamily; 10] = [
        FilterFamily::Id,
        FilterFamily::Name,
        FilterFamily::CtrIds,
        FilterFamily::CtrNames,
        FilterFamily::CtrNumber,
        FilterFamily::CtrStatus,
        FilterFamily::Status,
        FilterFamily::Label,
        FilterFamily::Until,
        FilterFamily::Network,
    ];

    /// The name used in filter requests, e.g. `ctr-ids`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterFamily::Id => "id",
            FilterFamily::Name => "name",
            FilterFamily::CtrIds => "ctr-ids",
            FilterFamily::CtrNames => "ctr-names",
            FilterFamily::CtrNumber => "ctr-number",
            FilterFamily::CtrStatus => "ctr-status",
            FilterFamily::Status => "status",
            FilterFamily::Label => "label",
            FilterFamily::Until => "until",
            FilterFamily::Network => "network",
        }
    }

    /// One-line description for help output.
    pub fn description(&self) -> &'static str {
        match self {
            FilterFamily::Id => "pod ID prefix (hex) or regex",
            FilterFamily::Name => "pod name regex",
            FilterFamily::CtrIds => "ID prefix (hex) or regex of any container in the pod",
            FilterFamily::CtrNames => "name regex of a container in the pod",
            FilterFamily::CtrNumber => "exact number of containers in the pod",
            FilterFamily::CtrStatus => {
                "state of any container: created, running, paused, stopped, exited, unknown"
            }
            FilterFamily::Status => {
                "pod status: stopped, running, paused, exited, dead, created, degraded"
            }
            FilterFamily::Label => "label key or key=value; all label filters must match",
            FilterFamily::Until => "created before a timestamp or duration ago",
            FilterFamily::Network => "network name or ID the infra container is attached to",
        }
    }

    /// Returns the family closest to `name`, if any is within the threshold.
    fn closest(name: &str) -> Option<FilterFamily> {
        let name_lower = name.to_lowercase();
        let (family, distance) = Self::ALL
            .iter()
            .map(|family| (*family, levenshtein(&name_lower, family.as_str())))
            .min_by_key(|(_, d)| *d)?;

        (distance <= MAX_SUGGESTION_DISTANCE).then_some(family)
    }
}

impl fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterFamily {
    type Err = FilterError;

    /// Parses a family name. Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| {
                let suggestion = Self::closest(s).map(|family| family.as_str().to_string());
                FilterError::unknown_family(s, suggestion)
            })
    }
}
