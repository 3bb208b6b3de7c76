pub mod change_event;
pub mod credentials;
pub mod export_format;
pub mod filter;
pub mod log_stats;
pub mod raw_log;
