use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::{FilterArgs, output};
use crate::core::errors::{AdtrailError, Result};
use crate::core::models::export_format::ExportFormat;
use crate::core::models::filter::FilterState;
use crate::core::services::export_service::ExportService;
use crate::core::services::filter_service::FilterService;

/// Execute the `adtrail export` command.
///
/// Fetches logs (optionally one entity's), applies the filters and writes
/// them as JSON or CSV. `output` of `-` writes to stdout; without it the
/// file is `historial_cambios_<date>.<ext>` in the export directory.
pub fn execute(
    ctx: &Context,
    format: ExportFormat,
    output_path: Option<&str>,
    entity_id: Option<&str>,
    filters: &FilterArgs,
) -> Result<()> {
    let filter = FilterState {
        entity_id: entity_id.map(str::to_string),
        ..filters.to_filter_state()?
    };

    let records = output::with_spinner("Fetching audit logs...", || ctx.fetch_filtered(&filter))?;
    let records = FilterService.apply_filters(&records, &filter);

    let svc = ExportService;
    let data = svc.encode(&records, format)?;

    if output_path == Some("-") {
        println!("{data}");
        return Ok(());
    }

    let path = match output_path {
        Some(p) => PathBuf::from(p),
        None => {
            let today = chrono::Local::now().date_naive();
            ctx.config.export_dir().join(svc.file_name(format, today))
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, data).map_err(|e| AdtrailError::ExportFailed {
        reason: format!("Cannot write {}: {e}", path.display()),
    })?;

    output::success(&format!(
        "Exported {} logs to {} ({})",
        records.len(),
        path.display(),
        format.mime_type()
    ));
    Ok(())
}
