mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::context::Context;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    cli::tracing_setup::init(args.verbose);
    cli::output::set_quiet(args.quiet);

    let result = Context::build(&args).and_then(|ctx| match &args.command {
        Commands::Logs {
            filters,
            entity_id,
            limit,
            details,
        } => cli::commands::logs::execute(&ctx, filters, entity_id.as_deref(), *limit, *details),
        Commands::History { entity_id, filters } => {
            cli::commands::history::execute(&ctx, entity_id, filters)
        }
        Commands::User { name, details } => cli::commands::user::execute(&ctx, name, *details),
        Commands::Recent { limit, details } => {
            cli::commands::recent::execute(&ctx, *limit, *details)
        }
        Commands::Stats => cli::commands::stats::execute(&ctx),
        Commands::Export {
            format,
            output,
            entity_id,
            filters,
        } => cli::commands::export::execute(
            &ctx,
            *format,
            output.as_deref(),
            entity_id.as_deref(),
            filters,
        ),
        Commands::Clear { yes } => cli::commands::clear::execute(&ctx, *yes),
    });

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
