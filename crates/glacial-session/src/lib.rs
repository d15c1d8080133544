//! Glacial Frontier: Session context.
//!
//! The root controller of a game. A session's state (location, inventory,
//! stats, day, weather and the narrative log) is the fold of its events.
//! Commands validate against that state, call out for narration or an image,
//! run the decay rules and the weather roll, and append the resulting events
//! in one batch.

pub mod application;
pub mod domain;
