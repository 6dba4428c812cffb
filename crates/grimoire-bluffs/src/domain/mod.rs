//! Domain layer for the bluff groups context.

pub mod collection;
pub mod commands;
pub mod events;
pub mod group;
pub mod slot_set;
pub mod tally;
pub mod title;
