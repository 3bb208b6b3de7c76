use crate::cli::context::Context;
use crate::cli::{output, render};
use crate::core::errors::Result;

/// Execute the `adtrail recent` command.
pub fn execute(ctx: &Context, limit: usize, details: bool) -> Result<()> {
    let records = output::with_spinner("Fetching recent activity...", || {
        ctx.transport.fetch_recent_logs(limit)
    })?;

    output::header(&format!("adtrail recent ({} entries)", records.len()));

    if records.is_empty() {
        output::warning("No audit entries found");
        return Ok(());
    }

    println!();
    for record in &records {
        render::print_log_entry(record, details);
    }

    Ok(())
}
