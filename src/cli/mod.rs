pub mod commands;
pub mod context;
pub mod output;
pub mod render;
pub mod tracing_setup;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::core::errors::Result;
use crate::core::models::change_event::ChangeCategory;
use crate::core::models::export_format::ExportFormat;
use crate::core::models::filter::{DateBound, FilterState, parse_date_bound};

/// Browse, filter and export the audit trail of your campaign backend.
#[derive(Parser, Debug)]
#[command(name = "adtrail", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the backend API (e.g. http://localhost:8080/api)
    #[arg(long, global = true, env = "ADTRAIL_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token. Overrides the stored session
    #[arg(long, global = true, env = "ADTRAIL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the audit log
    Logs {
        #[command(flatten)]
        filters: FilterArgs,
        /// Only logs of this entity
        #[arg(long)]
        entity_id: Option<String>,
        /// Show at most N entries
        #[arg(long, value_parser = positive_count())]
        limit: Option<usize>,
        /// Print before/after payloads
        #[arg(long)]
        details: bool,
    },

    /// Show the change history of one entity (e.g. a campaign id)
    History {
        /// Entity id
        entity_id: String,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the logs of one user
    User {
        /// Exact user name
        name: String,
        /// Print before/after payloads
        #[arg(long)]
        details: bool,
    },

    /// Show the most recent logs
    Recent {
        /// Number of entries
        #[arg(long, default_value_t = 50, value_parser = positive_count())]
        limit: usize,
        /// Print before/after payloads
        #[arg(long)]
        details: bool,
    },

    /// Show log statistics
    Stats,

    /// Export logs as JSON or CSV
    Export {
        /// Output format: json or csv
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Output file, or - for stdout (default: historial_cambios_<date>.<ext>)
        #[arg(short, long)]
        output: Option<String>,
        /// Only logs of this entity
        #[arg(long)]
        entity_id: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Delete ALL logs on the server
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Parser for `--limit`: a count of at least one.
fn positive_count() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

/// Filter flags shared by the list, history and export commands.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Change category: creation, edit, metrics, status, archived
    #[arg(long)]
    pub category: Option<ChangeCategory>,
    /// User name contains (case-insensitive)
    #[arg(long)]
    pub user: Option<String>,
    /// Role (Admin, Trafficker, Dueño, ...)
    #[arg(long)]
    pub role: Option<String>,
    /// Action contains (case-insensitive)
    #[arg(long)]
    pub action: Option<String>,
    /// Entity type (Campaña, Métricas, Creativo, ...)
    #[arg(long)]
    pub entity: Option<String>,
    /// From this date, inclusive (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub from: Option<String>,
    /// Up to this date, inclusive (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Build the filter state these flags describe.
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let from = self
            .from
            .as_deref()
            .map(|s| parse_date_bound(s, DateBound::Start))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .map(|s| parse_date_bound(s, DateBound::End))
            .transpose()?;

        Ok(FilterState {
            category: self.category,
            user: self.user.clone(),
            entity: self.entity.clone(),
            action: self.action.clone(),
            role: self.role.clone(),
            ..FilterState::default()
        }
        .with_date_range(from, to))
    }
}
