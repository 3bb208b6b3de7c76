use crate::cli::context::Context;
use crate::cli::{output, render};
use crate::core::errors::Result;

/// Execute the `adtrail user` command.
pub fn execute(ctx: &Context, name: &str, details: bool) -> Result<()> {
    let records = output::with_spinner(&format!("Fetching logs of {name}..."), || {
        ctx.transport.fetch_logs_by_user(name)
    })?;

    output::header(&format!("adtrail user {name} ({} entries)", records.len()));

    if records.is_empty() {
        output::warning(&format!("No audit entries found for user '{name}'"));
        println!("  The name must match exactly. Try 'adtrail logs --user {name}' for a partial match.");
        return Ok(());
    }

    println!();
    for record in &records {
        render::print_log_entry(record, details);
    }

    Ok(())
}
