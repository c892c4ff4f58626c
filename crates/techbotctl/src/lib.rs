//! TechBot Control - CLI front end for the TechBot diagnostic advisor.
//!
//! All question I/O lives here; the engine in techbot_common only
//! suspends and resumes. Split into a library so the integration tests
//! can drive command logic without a terminal.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod interactive;
