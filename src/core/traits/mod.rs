pub mod auditable;
pub mod log_transport;
pub mod session_store;
