use crate::cli::context::Context;
use crate::cli::{FilterArgs, output, render};
use crate::core::errors::Result;
use crate::core::models::filter::FilterState;
use crate::core::services::filter_service::FilterService;

/// Execute the `adtrail logs` command.
///
/// Fetches the audit log (one entity's, when `entity_id` is given),
/// applies the filters locally and prints the matching entries.
pub fn execute(
    ctx: &Context,
    filters: &FilterArgs,
    entity_id: Option<&str>,
    limit: Option<usize>,
    details: bool,
) -> Result<()> {
    let filter = FilterState {
        entity_id: entity_id.map(str::to_string),
        ..filters.to_filter_state()?
    };

    // Category is never sent to the server.
    let records = output::with_spinner("Fetching audit logs...", || ctx.fetch_filtered(&filter))?;

    let mut shown = FilterService.apply_filters(&records, &filter);
    if let Some(n) = limit {
        shown.truncate(n);
    }

    let title = match entity_id {
        Some(id) => format!("adtrail logs — entity {id}"),
        None => "adtrail logs".to_string(),
    };

    if shown.is_empty() {
        output::header(&title);
        output::warning("No audit entries found");
        if !filter.is_empty() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    output::header(&format!("{title} ({} entries)", shown.len()));
    println!();
    for record in &shown {
        render::print_log_entry(record, details);
    }
    println!();
    output::success(&render::count_summary(shown.len(), "log"));

    Ok(())
}
