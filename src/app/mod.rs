pub mod config;
pub mod dto;
pub mod engine;
pub mod report;
