//! Glacial Frontier — Rules context.
//!
//! The decay rule engine: a fixed table mapping (action keywords × weather)
//! to stat changes, plus the energy cost of travel. Everything here is a pure
//! function of its inputs.

pub mod domain;
