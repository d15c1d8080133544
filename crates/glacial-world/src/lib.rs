//! Glacial Frontier — World context.
//!
//! Owns the static location graph used for travel checks and the map read
//! model, and the weather table with its randomizer.

pub mod application;
pub mod domain;
