//! Grimoire CLI — headless host for the bluff groups context.
//!
//! Replays a JSON-lines script of user actions against a collection wired to
//! in-memory presentation, then reports the persisted shape.

pub mod config;
pub mod error;
pub mod headless;
pub mod script;
