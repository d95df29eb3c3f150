//! Command registration tool for the bingo bot.
//!
//! Separated from main.rs so the run pipeline can be driven from integration tests.

pub mod config;
pub mod logging;
pub mod runner;
