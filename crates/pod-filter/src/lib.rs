//! Filter predicates for pods.
//!
//! This crate compiles declarative filter requests (a family name such as
//! `status` or `network` plus string values) into predicates over pods, and
//! provides an in-memory snapshot model to run them against.
//!
//! - [`filter`] - the filter dispatcher and per-family compilers
//! - [`model`] - the traits a pod runtime implements to be filtered
//! - [`snapshot`] - a serde-backed implementation of those traits
//! - [`util`] - regex, label and timestamp matching helpers

pub mod filter;
pub mod model;
pub mod snapshot;
pub mod util;

pub use filter::{compile, FilterCompiler, FilterError, FilterFamily, FilterOptions, Predicate};
pub use model::{Container, ContainerState, NetworkRegistry, Pod};
pub use snapshot::{PodSnapshot, Snapshot, SnapshotStore};
