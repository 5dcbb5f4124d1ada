//! Identifier and name families: `id`, `name`, `ctr-ids`, `ctr-names`.

use regex::Regex;
use tracing::trace;

use super::compiler::{fail_closed, CtrNamesMatch, Predicate};
use super::family::FilterFamily;
use crate::model::{Container, Pod};
use crate::util::{is_hex_prefix, PatternList};

/// How one `id`/`ctr-ids` value is matched.
#[derive(Debug, Clone)]
enum IdMatcher {
    /// Lowercased hex prefix.
    Prefix(String),
    /// Unanchored regex.
    Pattern(Regex),
    /// A regex that failed to compile; never matches.
    Invalid,
}

impl IdMatcher {
    fn new(want: &str) -> Self {
        if is_hex_prefix(want) {
            return IdMatcher::Prefix(want.to_lowercase());
        }
        match Regex::new(want) {
            Ok(re) => IdMatcher::Pattern(re),
            Err(err) => {
                trace!(value = %want, error = %err, "ID filter is neither hex nor a valid regex");
                IdMatcher::Invalid
            }
        }
    }

    fn matches(&self, id: &str) -> bool {
        match self {
            IdMatcher::Prefix(prefix) => id.starts_with(prefix.as_str()),
            IdMatcher::Pattern(re) => re.is_match(id),
            IdMatcher::Invalid => false,
        }
    }
}

fn id_matchers(values: &[String]) -> Vec<IdMatcher> {
    values.iter().map(|want| IdMatcher::new(want)).collect()
}

/// `id`: the pod ID starts with a hex value or matches a regex value.
pub(crate) fn pod_id<P: Pod + 'static>(values: &[String]) -> Predicate<P> {
    let matchers = id_matchers(values);
    Predicate::new(FilterFamily::Id, move |pod: &P| {
        matchers.iter().any(|m| m.matches(pod.id()))
    })
}

/// `name`: the pod name matches any regex value.
pub(crate) fn pod_name<P: Pod + 'static>(values: &[String]) -> Predicate<P> {
    let patterns = PatternList::new(values);
    Predicate::new(FilterFamily::Name, move |pod: &P| {
        patterns.matches_any(pod.name())
    })
}

/// `ctr-ids`: any container ID matches any value.
pub(crate) fn container_ids<P: Pod + 'static>(values: &[String]) -> Predicate<P> {
    let matchers = id_matchers(values);
    Predicate::new(FilterFamily::CtrIds, move |pod: &P| {
        let ids = match pod.container_ids() {
            Ok(ids) => ids,
            Err(err) => return fail_closed(FilterFamily::CtrIds, pod, &err),
        };
        matchers
            .iter()
            .any(|m| ids.iter().any(|id| m.matches(id)))
    })
}

/// `ctr-names`: a container name matches any regex value.
///
/// With [`CtrNamesMatch::FirstChild`] only the first listed container is
/// considered.
pub(crate) fn container_names<P: Pod + 'static>(
    values: &[String],
    mode: CtrNamesMatch,
) -> Predicate<P> {
    let patterns = PatternList::new(values);
    Predicate::new(FilterFamily::CtrNames, move |pod: &P| {
        let containers = match pod.containers() {
            Ok(containers) => containers,
            Err(err) => return fail_closed(FilterFamily::CtrNames, pod, &err),
        };
        match mode {
            CtrNamesMatch::AnyChild => containers
                .iter()
                .any(|ctr| patterns.matches_any(ctr.name())),
            CtrNamesMatch::FirstChild => containers
                .first()
                .is_some_and(|ctr| patterns.matches_any(ctr.name())),
        }
    })
}
