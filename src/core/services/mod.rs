pub mod event_mapper;
pub mod export_service;
pub mod filter_service;
