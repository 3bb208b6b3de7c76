use crate::core::errors::Result;
use crate::core::models::filter::FilterState;
use crate::core::models::log_stats::LogStats;
use crate::core::models::raw_log::RawLogRecord;

/// Port for reading and clearing the remote audit log.
///
/// Every call is a single request: no retries, no caching. A non-success
/// status surfaces as `AdtrailError::Transport`.
pub trait LogTransport {
    /// All logs, narrowed server-side by the filter's user, role, action,
    /// entity and date fields.
    fn fetch_logs(&self, filter: &FilterState) -> Result<Vec<RawLogRecord>>;

    /// Logs attached to one entity.
    fn fetch_logs_by_entity(&self, entity_id: &str) -> Result<Vec<RawLogRecord>>;

    /// Logs written by one user (exact name).
    fn fetch_logs_by_user(&self, user: &str) -> Result<Vec<RawLogRecord>>;

    /// The `limit` most recent logs, newest first.
    fn fetch_recent_logs(&self, limit: usize) -> Result<Vec<RawLogRecord>>;

    /// Aggregate counters.
    fn fetch_stats(&self) -> Result<LogStats>;

    /// Delete every log on the server. Irreversible.
    fn delete_all_logs(&self) -> Result<()>;
}
