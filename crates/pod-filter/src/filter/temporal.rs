//! `until` family.

use tracing::trace;

use super::compiler::{Clock, Predicate};
use super::family::FilterFamily;
use crate::model::Pod;
use crate::util::compute_until_timestamp;

/// `until`: the pod was created strictly before the instant named by the value.
///
/// The instant is recomputed from `clock` on every evaluation, so a relative
/// value such as `1h` keeps tracking the clock for the predicate's lifetime.
pub(crate) fn until<P: Pod + 'static>(values: &[String], clock: Clock) -> Predicate<P> {
    let values = values.to_vec();
    Predicate::new(FilterFamily::Until, move |pod: &P| {
        match compute_until_timestamp(&values, clock.now()) {
            Ok(until) => pod.created_at() < until,
            Err(err) => {
                trace!(filter = "until", pod = pod.id(), error = %err, "invalid until value, excluding pod");
                false
            }
        }
    })
}
