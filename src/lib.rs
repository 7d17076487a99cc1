//! Loan Chat — sequential-prompt loan eligibility dialogue.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod flow;
pub mod predict;
pub mod transcript;
