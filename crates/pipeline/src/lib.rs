//! Generation pipeline: style resolution through catalog commit.
//!
//! One [`Pipeline::run`] call takes a title + style slug, synthesizes an
//! image, produces every configured variant, uploads the content, and
//! commits a consistent catalog record. The synthesizer, content store,
//! and catalog all sit behind traits so the orchestration is testable
//! with in-memory doubles.

pub mod derivative;
pub mod error;
pub mod generate;

pub use error::PipelineError;
pub use generate::{
    CatalogSink, CommitError, GenerationReceipt, GenerationRequest, PgCatalog, Pipeline,
    PipelineConfig, Synthesizer,
};
