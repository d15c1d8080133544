//! Domain model for the Session context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod log;
