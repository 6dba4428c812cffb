//! Grimoire — demon bluff groups bounded context.
//!
//! Responsible for the scrollable collection of bluff groups, the three
//! character slots inside each group, deciding which group is active, and
//! the persisted shape of the whole collection.

pub mod application;
pub mod domain;
