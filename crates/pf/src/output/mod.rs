//! Output formatting utilities for the pf CLI.
//!
//! - [`pods`] - pod listing (table and JSON)
//! - [`families`] - filter family listing
//! - [`helpers`] - common formatting utilities (truncation, status colors)

mod families;
pub mod helpers;
mod pods;

pub use families::{format_families_json, format_families_table};
pub use pods::{format_pods_json, format_pods_table};
