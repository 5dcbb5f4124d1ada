//! Matching helpers shared by the filter compilers.
//!
//! - [`patterns`] - hex-prefix detection and regex list matching
//! - [`labels`] - `key` / `key=value` label filter expressions
//! - [`until`] - duration and timestamp parsing for `until` filters

pub mod labels;
pub mod patterns;
pub mod until;

pub use labels::{match_label_filters, LabelFilters};
pub use patterns::{is_hex_prefix, string_match_regex_slice, PatternList};
pub use until::{compute_until_timestamp, UntilError};
