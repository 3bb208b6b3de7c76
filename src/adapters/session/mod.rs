pub mod file_session_store;
