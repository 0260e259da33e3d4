//! CLI command implementations.

pub mod generate;
pub mod filter;
pub mod rules;
pub mod version;
