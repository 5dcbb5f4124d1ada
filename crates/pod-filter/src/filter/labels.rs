//! `label` family.

use super::compiler::Predicate;
use super::family::FilterFamily;
use crate::model::Pod;
use crate::util::LabelFilters;

/// `label`: the pod's labels satisfy every `key[=value]` value.
pub(crate) fn label<P: Pod + 'static>(values: &[String]) -> Predicate<P> {
    let filters = LabelFilters::parse(values);
    Predicate::new(FilterFamily::Label, move |pod: &P| {
        filters.matches(pod.labels())
    })
}
