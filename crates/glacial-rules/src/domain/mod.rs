//! Domain model for the Rules context.

pub mod decay;
pub mod stats;
