//! Pure domain logic for the atelier generation pipeline.
//!
//! Everything in this crate is synchronous, deterministic, and free of I/O
//! so it can be used by the pipeline, the repository layer, and any future
//! CLI tooling without dragging in a runtime.

pub mod canvas;
pub mod error;
pub mod prompt;
pub mod styles;
pub mod types;
pub mod variants;
