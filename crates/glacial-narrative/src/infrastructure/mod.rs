//! Remote model clients.

pub mod gemini;
