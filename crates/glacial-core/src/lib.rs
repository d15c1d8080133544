//! Glacial Frontier Core — shared domain abstractions.
//!
//! Defines the traits and types the game crates share: the event-sourcing
//! primitives, the domain error, and the clock and RNG seams that keep every
//! handler deterministic under test. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
pub mod rng;
