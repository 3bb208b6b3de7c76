pub mod clear;
pub mod export;
pub mod history;
pub mod logs;
pub mod recent;
pub mod stats;
pub mod user;
