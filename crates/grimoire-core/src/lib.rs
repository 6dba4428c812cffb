//! Grimoire Core — shared domain abstractions.
//!
//! This crate defines the traits and types that every grimoire context
//! depends on. It contains no presentation code.

pub mod bus;
pub mod character;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod ports;
