//! Core library for LBX: configuration, logging, and the ledger API client.

pub mod api;
pub mod config;
pub mod logging;
pub mod types;
