use std::collections::BTreeMap;

use colored::Colorize;

use crate::cli::context::Context;
use crate::cli::{output, render};
use crate::core::errors::Result;
use crate::core::models::log_stats::LogStats;

/// Rows shown per breakdown section.
const TOP_N: usize = 10;

/// Execute the `adtrail stats` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let stats = output::with_spinner("Fetching statistics...", || ctx.transport.fetch_stats())?;

    output::header("📊 adtrail stats");
    println!("  Total logs: {}", stats.total_logs.to_string().cyan());

    print_breakdown("By user", &stats.by_user);
    print_breakdown("By action", &stats.by_action);
    print_breakdown("By entity", &stats.by_entity);

    println!("\n{}", "  Recent activity".bold());
    if stats.recent_activity.is_empty() {
        output::warning("No recent activity");
    } else {
        for record in &stats.recent_activity {
            render::print_log_entry(record, false);
        }
    }

    Ok(())
}

fn print_breakdown(title: &str, counts: &BTreeMap<String, u64>) {
    println!("\n{}", format!("  {title}").bold());
    if counts.is_empty() {
        println!("    {}", "—".dimmed());
        return;
    }

    let ranked = LogStats::ranked(counts);
    let width = ranked
        .iter()
        .take(TOP_N)
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, count) in ranked.iter().take(TOP_N) {
        let pad = width - name.chars().count();
        println!("    {name}{} {}", " ".repeat(pad), count.to_string().cyan());
    }
    if ranked.len() > TOP_N {
        println!("    {}", format!("... and {} more", ranked.len() - TOP_N).dimmed());
    }
}
