//! Glacial Frontier — Narrative context.
//!
//! Turns game state into prompts for a remote generative model and brings
//! back narration text and scene images. Remote failures never reach the
//! player as errors: narration degrades to a fixed line and images to
//! nothing.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
