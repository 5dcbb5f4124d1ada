//! Filter predicate compiler for pods.
//!
//! A filter request is a family name plus one or more string values. The
//! compiler validates the request and returns a [`Predicate`] that can be
//! applied to any number of pods, from any number of threads.
//!
//! # Families
//!
//! ## Identity
//! - `id` - pod ID: hex values match as a prefix, anything else as a regex
//! - `name` - pod name regex
//! - `ctr-ids` - like `id`, over every container in the pod
//! - `ctr-names` - name regex over the pod's containers
//!
//! ## Aggregates
//! - `ctr-number` - exact container count
//! - `ctr-status` - `created`, `running`, `paused`, `stopped`, `exited`, `unknown`
//! - `status` - `stopped`, `running`, `paused`, `exited`, `dead`, `created`, `degraded`
//!
//! ## Metadata
//! - `label` - `key` or `key=value`; every label value must match
//! - `until` - created before a timestamp, or before a duration ago
//!
//! ## Relations
//! - `network` - infra container attached to one of the named networks
//!
//! # Errors
//!
//! Bad requests fail at compile time with a [`FilterError`]. Lookups that
//! fail while a predicate runs never surface: the pod simply does not match.
//!
//! # Example
//!
//! ```
//! use pod_filter_rs::filter::{FilterCompiler, FilterFamily};
//! use pod_filter_rs::snapshot::{PodSnapshot, Snapshot};
//!
//! let snapshot: Snapshot = serde_json::from_str(r#"{
//!     "pods": [{
//!         "id": "3f2a9c",
//!         "name": "web",
//!         "created": "2024-05-01T10:00:00Z",
//!         "containers": [
//!             { "id": "aa01", "name": "web-infra", "state": "running", "infra": true },
//!             { "id": "bb02", "name": "web-app", "state": "running" }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let compiler = FilterCompiler::new();
//! let running = compiler
//!     .compile_family::<PodSnapshot, _>(FilterFamily::Status, &["running".into()], &snapshot)
//!     .unwrap();
//! assert_eq!(running.filter(&snapshot.pods).len(), 1);
//! ```

mod compiler;
mod error;
mod family;
mod identity;
mod labels;
mod network;
mod status;
mod temporal;

pub use compiler::{compile, Clock, CtrNamesMatch, FilterCompiler, FilterOptions, Predicate};
pub use error::{FilterError, FilterResult};
pub use family::FilterFamily;
pub use status::{CONTAINER_STATUSES, POD_STATUSES};
