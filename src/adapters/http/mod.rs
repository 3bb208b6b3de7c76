pub mod http_log_transport;
