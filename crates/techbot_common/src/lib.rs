//! TechBot Common - Inference engine and knowledge corpus for TechBot v0.4
//!
//! No question I/O in here. The engine suspends when it needs an answer;
//! front ends (techbotctl, simulators) own the terminal.

pub mod engine;
pub mod error;
pub mod facts;
pub mod knowledge;
pub mod report;
pub mod rules;

pub use engine::*;
pub use error::*;
pub use facts::*;
pub use knowledge::*;
pub use report::*;
pub use rules::*;
