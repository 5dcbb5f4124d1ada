//! `network` family.
//!
//! Unlike every other family, `network` does its lookups at compile time:
//! each value is resolved to a canonical network name through the registry,
//! and only those names are captured by the predicate.

use tracing::debug;

use super::compiler::{fail_closed, Predicate};
use super::error::FilterResult;
use super::family::FilterFamily;
use crate::model::{Container, NetworkRegistry, Pod};

/// `network`: the pod's infra container is attached to any resolved network.
///
/// Values naming networks that do not exist are dropped. If none resolve,
/// the predicate matches nothing.
pub(crate) fn network<P, R>(values: &[String], registry: &R) -> FilterResult<Predicate<P>>
where
    P: Pod + 'static,
    R: NetworkRegistry + ?Sized,
{
    let mut names: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        match registry.inspect(value) {
            Ok(net) => {
                if !names.contains(&net.name) {
                    names.push(net.name);
                }
            }
            Err(err) if err.is_not_found() => {
                debug!(network = %value, "ignoring filter on unknown network");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Predicate::new(FilterFamily::Network, move |pod: &P| {
        let infra = match pod.infra_container() {
            Ok(infra) => infra,
            Err(err) => return fail_closed(FilterFamily::Network, pod, &err),
        };
        let attached = match infra.networks() {
            Ok(attached) => attached,
            Err(err) => return fail_closed(FilterFamily::Network, pod, &err),
        };
        attached.iter().any(|net| names.contains(net))
    }))
}
