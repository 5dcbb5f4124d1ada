//! Aggregate families: `ctr-number`, `ctr-status`, `status`.
//!
//! The two status families have different vocabularies and different
//! normalization. `ctr-status` folds `configured` into `created` and
//! `stopped` into `exited` on both sides; `status` compares the lowercased
//! pod status as-is.

use super::compiler::{fail_closed, Predicate};
use super::error::{FilterError, FilterResult};
use super::family::FilterFamily;
use crate::model::{ContainerState, Pod};

/// Values accepted by `ctr-status`.
pub const CONTAINER_STATUSES: [&str; 6] =
    ["created", "running", "paused", "stopped", "exited", "unknown"];

/// Values accepted by `status`.
pub const POD_STATUSES: [&str; 7] = [
    "stopped", "running", "paused", "exited", "dead", "created", "degraded",
];

/// `ctr-number`: the pod has exactly N containers for some value N.
///
/// Values are parsed on every evaluation; unparsable ones never match.
pub(crate) fn container_number<P: Pod + 'static>(values: &[String]) -> Predicate<P> {
    let values = values.to_vec();
    Predicate::new(FilterFamily::CtrNumber, move |pod: &P| {
        let ids = match pod.container_ids() {
            Ok(ids) => ids,
            Err(err) => return fail_closed(FilterFamily::CtrNumber, pod, &err),
        };
        values
            .iter()
            .filter_map(|value| value.parse::<usize>().ok())
            .any(|want| want == ids.len())
    })
}

/// `ctr-status`: any container is in any of the given states.
pub(crate) fn container_status<P: Pod + 'static>(values: &[String]) -> FilterResult<Predicate<P>> {
    let mut wanted: Vec<&'static str> = Vec::with_capacity(values.len());
    for value in values {
        let Some(status) = CONTAINER_STATUSES
            .iter()
            .copied()
            .find(|status| *status == value.as_str())
        else {
            return Err(FilterError::invalid_container_status(value.as_str()));
        };
        wanted.push(if status == "stopped" { "exited" } else { status });
    }

    Ok(Predicate::new(FilterFamily::CtrStatus, move |pod: &P| {
        let states = match pod.container_states() {
            Ok(states) => states,
            Err(err) => return fail_closed(FilterFamily::CtrStatus, pod, &err),
        };
        states
            .iter()
            .map(|state| normalize_container_state(*state))
            .any(|state| wanted.contains(&state))
    }))
}

/// `status`: the lowercased pod status equals any value.
pub(crate) fn pod_status<P: Pod + 'static>(values: &[String]) -> FilterResult<Predicate<P>> {
    if let Some(bad) = values
        .iter()
        .find(|value| !POD_STATUSES.contains(&value.as_str()))
    {
        return Err(FilterError::invalid_pod_status(bad.as_str()));
    }

    let wanted = values.to_vec();
    Ok(Predicate::new(FilterFamily::Status, move |pod: &P| {
        let status = match pod.status() {
            Ok(status) => status.to_lowercase(),
            Err(err) => return fail_closed(FilterFamily::Status, pod, &err),
        };
        wanted.iter().any(|want| *want == status)
    }))
}

/// Maps a raw container state onto the `ctr-status` vocabulary.
fn normalize_container_state(state: ContainerState) -> &'static str {
    match state {
        ContainerState::Configured => "created",
        ContainerState::Stopped => "exited",
        other => other.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_container_state() {
        assert_eq!(normalize_container_state(ContainerState::Configured), "created");
        assert_eq!(normalize_container_state(ContainerState::Stopped), "exited");
        assert_eq!(normalize_container_state(ContainerState::Exited), "exited");
        assert_eq!(normalize_container_state(ContainerState::Running), "running");
        assert_eq!(normalize_container_state(ContainerState::Stopping), "stopping");
    }

    #[test]
    fn test_vocabularies_differ() {
        assert!(CONTAINER_STATUSES.contains(&"unknown"));
        assert!(!POD_STATUSES.contains(&"unknown"));
        assert!(POD_STATUSES.contains(&"degraded"));
        assert!(!CONTAINER_STATUSES.contains(&"degraded"));
    }
}
