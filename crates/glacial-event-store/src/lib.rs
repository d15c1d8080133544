//! Event store implementations for Glacial Frontier.
//!
//! Sessions live for the lifetime of the server process; nothing is written
//! to disk.

pub mod in_memory_event_repository;
