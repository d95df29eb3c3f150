//! Shared wire types for the bingo bot command registry.

mod command;

pub use command::*;
