//! Transformation module.
//!
//! - Pipeline: load, infer, generate, write

pub mod pipeline;

pub use pipeline::*;
