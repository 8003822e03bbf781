//! Capture-session engine for listing photography shoots.
//!
//! The engine itself lives under [`workflows::capture`]; configuration, error
//! aggregation and telemetry wiring are shared with the API service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
