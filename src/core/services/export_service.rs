use chrono::NaiveDate;

use crate::core::errors::{AdtrailError, Result};
use crate::core::models::export_format::ExportFormat;
use crate::core::models::raw_log::RawLogRecord;

/// Column header of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "Fecha",
    "Usuario",
    "Rol",
    "Acción",
    "Entidad",
    "ID",
    "Descripción",
];

/// Encodes raw log records for download.
pub struct ExportService;

impl ExportService {
    /// Encode `records` in the requested format.
    ///
    /// - **JSON**: the records pretty-printed, with the backend's field names
    /// - **CSV**: [`CSV_HEADER`] then one row per record, fields quoted per
    ///   RFC 4180 when they contain a comma, quote or line break
    pub fn encode(&self, records: &[RawLogRecord], format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => {
                serde_json::to_string_pretty(records).map_err(|e| AdtrailError::ExportFailed {
                    reason: format!("Failed to serialize logs as JSON: {e}"),
                })
            }
            ExportFormat::Csv => encode_csv(records),
        }
    }

    /// Download name for an export made on `date`:
    /// `historial_cambios_<yyyy-MM-dd>.<ext>`.
    pub fn file_name(&self, format: ExportFormat, date: NaiveDate) -> String {
        format!(
            "historial_cambios_{}.{}",
            date.format("%Y-%m-%d"),
            format.extension()
        )
    }
}

fn encode_csv(records: &[RawLogRecord]) -> Result<String> {
    let csv_error = |e: csv::Error| AdtrailError::ExportFailed {
        reason: format!("Failed to write CSV: {e}"),
    };

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for record in records {
        let id = record.entity_id.as_str();
        let description = record.description.as_deref().unwrap_or("");
        writer
            .write_record([
                record.timestamp.as_deref().unwrap_or(""),
                record.user.as_str(),
                record.role.as_str(),
                record.action.as_str(),
                record.entity.as_str(),
                id,
                description,
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| AdtrailError::ExportFailed {
        reason: format!("Failed to flush CSV: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| AdtrailError::ExportFailed {
        reason: format!("CSV output is not valid UTF-8: {e}"),
    })
}
