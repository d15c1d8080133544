//! Shared test mocks and utilities for Glacial Frontier.

mod clock;
mod narrator;
mod repository;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use narrator::{FailingNarrator, ScriptedIllustrator, ScriptedNarrator};
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
pub use rng::{MockRng, SequenceRng};
