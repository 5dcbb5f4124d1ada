//! Filter dispatch: turns a family name and its values into a [`Predicate`].
//!
//! # Example
//!
//! ```
//! use pod_filter_rs::filter::compile;
//! use pod_filter_rs::snapshot::{PodSnapshot, Snapshot};
//!
//! let snapshot = Snapshot::default();
//! let predicate = compile::<PodSnapshot, _>("status", &["running".to_string()], &snapshot)
//!     .unwrap();
//! assert!(predicate.filter(&snapshot.pods).is_empty());
//!
//! let err = compile::<PodSnapshot, _>("colour", &[], &snapshot).unwrap_err();
//! assert_eq!(err.to_string(), "invalid filter: colour");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::FilterResult;
use super::family::FilterFamily;
use super::{identity, labels, network, status, temporal};
use crate::model::{LookupError, NetworkRegistry, Pod};

/// A compiled filter: a side-effect-free test over pods.
///
/// Predicates are immutable, cheap to clone and safe to call from many
/// threads at once.
pub struct Predicate<P> {
    family: FilterFamily,
    test: Arc<dyn Fn(&P) -> bool + Send + Sync>,
}

impl<P> Predicate<P> {
    pub(crate) fn new<F>(family: FilterFamily, test: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self {
            family,
            test: Arc::new(test),
        }
    }

    /// The family this predicate was compiled from.
    pub fn family(&self) -> FilterFamily {
        self.family
    }

    /// Returns true if the pod matches.
    pub fn matches(&self, pod: &P) -> bool {
        (self.test)(pod)
    }

    /// Filters a slice of pods, returning only those that match.
    pub fn filter<'a>(&self, pods: &'a [P]) -> Vec<&'a P> {
        pods.iter().filter(|pod| self.matches(pod)).collect()
    }
}

impl<P> Clone for Predicate<P> {
    fn clone(&self) -> Self {
        Self {
            family: self.family,
            test: Arc::clone(&self.test),
        }
    }
}

impl<P> fmt::Debug for Predicate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// How `ctr-names` treats pods with several containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CtrNamesMatch {
    /// Match if any container name matches.
    #[default]
    AnyChild,
    /// Decide using the first listed container only.
    FirstChild,
}

impl CtrNamesMatch {
    /// The configuration name, e.g. `any-child`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CtrNamesMatch::AnyChild => "any-child",
            CtrNamesMatch::FirstChild => "first-child",
        }
    }
}

impl FromStr for CtrNamesMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any-child" => Ok(CtrNamesMatch::AnyChild),
            "first-child" => Ok(CtrNamesMatch::FirstChild),
            other => Err(format!(
                "invalid ctr-names mode '{other}' (expected any-child or first-child)"
            )),
        }
    }
}

/// Source of "now" for time-relative filters.
#[derive(Clone)]
pub struct Clock {
    now: Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>,
}

impl Clock {
    /// The system clock.
    pub fn system() -> Self {
        Self::from_fn(Utc::now)
    }

    /// A clock frozen at `instant`.
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self::from_fn(move || instant)
    }

    /// A clock backed by an arbitrary function.
    pub fn from_fn<F>(now: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self { now: Arc::new(now) }
    }

    /// Returns the current instant.
    pub fn now(&self) -> DateTime<Utc> {
        (self.now)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock").finish_non_exhaustive()
    }
}

/// Options that change how some families compile.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// `ctr-names` behaviour for pods with several containers.
    pub ctr_names: CtrNamesMatch,
    /// Clock consulted by `until` on every evaluation.
    pub clock: Clock,
}

/// Compiles filter requests into predicates.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    options: FilterOptions,
}

impl FilterCompiler {
    /// Creates a compiler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler with the given options.
    pub fn with_options(options: FilterOptions) -> Self {
        Self { options }
    }

    /// Returns the compiler's options.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Compiles the filter named `family` with its `values`.
    ///
    /// Values of one request are OR-combined. `registry` is only consulted
    /// by the `network` family, once per value, before this returns.
    ///
    /// # Errors
    ///
    /// - `FilterError::UnknownFamily` if `family` is not recognized.
    /// - `FilterError::InvalidContainerStatus` / `InvalidPodStatus` for values
    ///   outside the `ctr-status` / `status` vocabularies.
    /// - `FilterError::Network` if a network lookup fails for any reason other
    ///   than the network not existing.
    pub fn compile<P, R>(
        &self,
        family: &str,
        values: &[String],
        registry: &R,
    ) -> FilterResult<Predicate<P>>
    where
        P: Pod + 'static,
        R: NetworkRegistry + ?Sized,
    {
        let family: FilterFamily = family.parse()?;
        self.compile_family(family, values, registry)
    }

    /// Compiles an already parsed family.
    pub fn compile_family<P, R>(
        &self,
        family: FilterFamily,
        values: &[String],
        registry: &R,
    ) -> FilterResult<Predicate<P>>
    where
        P: Pod + 'static,
        R: NetworkRegistry + ?Sized,
    {
        let predicate = match family {
            FilterFamily::Id => identity::pod_id(values),
            FilterFamily::Name => identity::pod_name(values),
            FilterFamily::CtrIds => identity::container_ids(values),
            FilterFamily::CtrNames => identity::container_names(values, self.options.ctr_names),
            FilterFamily::CtrNumber => status::container_number(values),
            FilterFamily::CtrStatus => status::container_status(values)?,
            FilterFamily::Status => status::pod_status(values)?,
            FilterFamily::Label => labels::label(values),
            FilterFamily::Until => temporal::until(values, self.options.clock.clone()),
            FilterFamily::Network => network::network(values, registry)?,
        };
        debug!(filter = %family, values = ?values, "compiled pod filter");
        Ok(predicate)
    }
}

/// Compiles a filter request with default options.
///
/// See [`FilterCompiler::compile`].
pub fn compile<P, R>(family: &str, values: &[String], registry: &R) -> FilterResult<Predicate<P>>
where
    P: Pod + 'static,
    R: NetworkRegistry + ?Sized,
{
    FilterCompiler::new().compile(family, values, registry)
}

/// Records an evaluation-time lookup failure and reports "no match".
pub(crate) fn fail_closed<P: Pod>(family: FilterFamily, pod: &P, err: &LookupError) -> bool {
    trace!(filter = %family, pod = pod.id(), error = %err, "lookup failed, excluding pod");
    false
}
