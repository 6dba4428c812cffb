//! Application layer for the bluff groups context.

pub mod command_handlers;
pub mod query_handlers;
