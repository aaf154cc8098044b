//! SlideCraft Core - Foundational types for the SlideCraft pipeline
//!
//! This crate provides the types that the generation crate and the CLI share:
//! - `Slide`, `SlideMetadata` - The slide records every stage operates on
//! - `GenerationRequest`, `TopicAnalysis` - Caller intent
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, SlideCraftError};
pub use types::{GenerationRequest, Slide, SlideMetadata, TopicAnalysis};
