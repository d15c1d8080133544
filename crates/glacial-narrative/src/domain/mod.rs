//! Domain model for the Narrative context.

pub mod prompts;
