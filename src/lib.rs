//! smeter — smart-meter CSV to cost & consumption reporting
//!
//! Per-commodity pipeline: read CSV intervals → normalize timestamps →
//! apply tariff → aggregate monthly → summarize. Gas and electricity run
//! independently and are combined only at the reporting boundary.

pub mod cli;
pub mod config;
pub mod observability;
pub mod readers;
pub mod render;
pub mod services;
pub mod types;
