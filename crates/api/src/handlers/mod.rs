//! HTTP handlers, grouped by resource.

pub mod artworks;
pub mod generate;
pub mod styles;
