//! Row models and DTOs for the artwork catalog.

pub mod artwork;
pub mod asset;
pub mod variant;
