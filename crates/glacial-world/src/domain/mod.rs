//! Domain model for the World context.

pub mod locations;
pub mod weather;
