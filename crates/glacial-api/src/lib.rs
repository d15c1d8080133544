//! Glacial Frontier — HTTP API.
//!
//! Exposes the session commands and queries and the static world read
//! models over JSON, for a browser front end to drive.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
