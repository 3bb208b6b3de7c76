use crate::cli::context::Context;
use crate::cli::{FilterArgs, output, render};
use crate::core::errors::Result;
use crate::core::services::event_mapper::EventMapper;
use crate::core::services::filter_service::FilterService;

/// Execute the `adtrail history` command.
///
/// Shows the change history of one entity: its logs mapped to typed
/// change events, narrowed by category, user and date range.
pub fn execute(ctx: &Context, entity_id: &str, filters: &FilterArgs) -> Result<()> {
    let filter = filters.to_filter_state()?;

    let records = output::with_spinner("Loading change history...", || {
        ctx.transport.fetch_logs_by_entity(entity_id)
    })?;

    let mapped = EventMapper.map_all(&records);
    if mapped.skipped > 0 {
        tracing::debug!(skipped = mapped.skipped, "dropped records without timestamp");
    }
    let events = FilterService.apply_filters(&mapped.events, &filter);

    output::header(&format!("📋 Change history — {entity_id}"));

    if events.is_empty() {
        output::warning("No changes found");
        if !filter.is_empty() {
            println!("  Try removing filters to see all changes.");
        }
        return Ok(());
    }

    println!();
    for event in &events {
        render::print_change_event(event);
        println!();
    }
    output::success(&render::count_summary(events.len(), "change"));

    Ok(())
}
