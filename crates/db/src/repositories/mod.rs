//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod artwork_repo;
pub mod asset_repo;
pub mod catalog_repo;
pub mod variant_repo;

pub use artwork_repo::ArtworkRepo;
pub use asset_repo::AssetRepo;
pub use catalog_repo::CatalogRepo;
pub use variant_repo::VariantRepo;
