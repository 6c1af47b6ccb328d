//! Completion service integration module

pub mod analyzer;
pub mod client;
pub mod prompts;
pub mod response;
