//! Families command implementation.
//!
//! Lists the filter families `pf ps --filter` accepts.

use pod_filter_rs::FilterFamily;

use super::{CommandContext, Result};
use crate::output::{format_families_json, format_families_table};

/// Executes the families command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_families_json(&FilterFamily::ALL)?);
    } else if !ctx.quiet {
        print!("{}", format_families_table(&FilterFamily::ALL, ctx.use_colors));
    }
    Ok(())
}
