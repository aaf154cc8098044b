//! CLI command implementations

pub mod generate;
pub mod parse;
pub mod providers;
pub mod score;
