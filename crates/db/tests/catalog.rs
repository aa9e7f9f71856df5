//! Integration tests for the catalog writer and reader.
//!
//! These exercise the repository layer against a real database and are
//! ignored by default; run them with `cargo test -- --ignored` against a
//! provisioned Postgres.

use atelier_db::models::artwork::{
    CatalogFilter, CatalogSort, CreateArtwork, PageRequest, STATUS_PUBLISHED,
};
use atelier_db::models::asset::CreateAsset;
use atelier_db::models::variant::CreateVariant;
use atelier_db::repositories::{ArtworkRepo, CatalogRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn draft(title: &str, style_key: &str) -> CreateArtwork {
    CreateArtwork {
        title: title.to_string(),
        artist: "Vincent van Gogh".to_string(),
        style_key: style_key.to_string(),
        price_cents: 1900,
        thumbnail_url: "https://blob.test/art/orig.png".to_string(),
        tags: vec![],
        category: None,
        featured: false,
    }
}

fn originating_asset() -> CreateAsset {
    CreateAsset {
        provider: "openai:gpt-image-1".to_string(),
        prompt: "Starry Harbor Over Canal. Create an original artwork ...".to_string(),
        original_url: "https://blob.test/art/orig.png".to_string(),
    }
}

fn variant(format: &str, width: i32) -> CreateVariant {
    CreateVariant {
        format: format.to_string(),
        width,
        height: width,
        url: format!("https://blob.test/art/{width}.{}", format.to_lowercase()),
        price_cents: if width >= 2048 { 4900 } else { 1900 },
    }
}

fn full_variant_set() -> Vec<CreateVariant> {
    let mut variants = Vec::new();
    for width in [1024, 2048] {
        for format in ["PNG", "JPG", "WEBP"] {
            variants.push(variant(format, width));
        }
    }
    variants
}

async fn seed_artwork(pool: &PgPool, title: &str, style_key: &str) -> i64 {
    CatalogRepo::commit_generation(pool, &draft(title, style_key), &originating_asset(), &full_variant_set())
        .await
        .expect("seed commit failed")
        .id
}

// ---------------------------------------------------------------------------
// Catalog writer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn commit_creates_artwork_asset_and_variants(pool: PgPool) {
    let artwork = CatalogRepo::commit_generation(
        &pool,
        &draft("Starry Harbor Over Canal", "VAN_GOGH"),
        &originating_asset(),
        &full_variant_set(),
    )
    .await
    .unwrap();

    assert_eq!(artwork.status, STATUS_PUBLISHED);

    let detail = ArtworkRepo::find_with_assets(&pool, artwork.id)
        .await
        .unwrap()
        .expect("artwork should exist");
    assert_eq!(detail.assets.len(), 1);
    assert_eq!(detail.assets[0].variants.len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn commit_repoints_thumbnail_at_medium_png(pool: PgPool) {
    let artwork = CatalogRepo::commit_generation(
        &pool,
        &draft("Harbor", "VAN_GOGH"),
        &originating_asset(),
        &full_variant_set(),
    )
    .await
    .unwrap();

    assert_eq!(artwork.thumbnail_url, "https://blob.test/art/1024.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn failed_commit_leaves_no_partial_rows(pool: PgPool) {
    // width = 0 violates the variants check constraint after the artwork
    // and asset rows have already been inserted in the transaction.
    let mut variants = full_variant_set();
    variants.push(variant("PNG", 0));

    let result = CatalogRepo::commit_generation(
        &pool,
        &draft("Broken", "VAN_GOGH"),
        &originating_asset(),
        &variants,
    )
    .await;
    assert!(result.is_err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artworks WHERE title = 'Broken'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

// ---------------------------------------------------------------------------
// Catalog reader
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn search_filters_by_style(pool: PgPool) {
    for i in 0..3 {
        seed_artwork(&pool, &format!("Harbor {i}"), "VAN_GOGH").await;
    }
    for i in 0..2 {
        seed_artwork(&pool, &format!("Lily Pond {i}"), "MONET").await;
    }

    let filter = CatalogFilter {
        style_key: Some("VAN_GOGH".to_string()),
        ..Default::default()
    };
    let page = ArtworkRepo::search(&pool, &filter, CatalogSort::Newest, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|a| a.style_key == "VAN_GOGH"));
    // Newest first.
    for pair in page.items.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn search_total_ignores_page_size(pool: PgPool) {
    for i in 0..5 {
        seed_artwork(&pool, &format!("Harbor {i}"), "VAN_GOGH").await;
    }

    let page = ArtworkRepo::search(
        &pool,
        &CatalogFilter::default(),
        CatalogSort::Newest,
        PageRequest::new(Some(1), Some(2)),
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.page_count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn search_excludes_reserved_tags(pool: PgPool) {
    seed_artwork(&pool, "Visible", "VAN_GOGH").await;

    let mut tagged = draft("Diagnostic", "VAN_GOGH");
    tagged.tags = vec!["smoketest".to_string()];
    CatalogRepo::commit_generation(&pool, &tagged, &originating_asset(), &full_variant_set())
        .await
        .unwrap();

    let page = ArtworkRepo::search(
        &pool,
        &CatalogFilter::default(),
        CatalogSort::Newest,
        PageRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Visible");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn search_free_text_matches_title_artist_and_tags(pool: PgPool) {
    seed_artwork(&pool, "Starry Harbor", "VAN_GOGH").await;
    seed_artwork(&pool, "Quiet Orchard", "MONET").await;

    let filter = CatalogFilter {
        text: Some("harbor".to_string()),
        ..Default::default()
    };
    let page = ArtworkRepo::search(&pool, &filter, CatalogSort::Newest, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Starry Harbor");

    // Artist matching: every seeded row shares the same artist.
    let filter = CatalogFilter {
        text: Some("van gogh".to_string()),
        ..Default::default()
    };
    let page = ArtworkRepo::search(&pool, &filter, CatalogSort::Newest, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn search_price_sort_is_stable(pool: PgPool) {
    for i in 0..4 {
        seed_artwork(&pool, &format!("Harbor {i}"), "VAN_GOGH").await;
    }

    let first = ArtworkRepo::search(
        &pool,
        &CatalogFilter::default(),
        CatalogSort::PriceAsc,
        PageRequest::default(),
    )
    .await
    .unwrap();
    let second = ArtworkRepo::search(
        &pool,
        &CatalogFilter::default(),
        CatalogSort::PriceAsc,
        PageRequest::default(),
    )
    .await
    .unwrap();

    let first_ids: Vec<_> = first.items.iter().map(|a| a.id).collect();
    let second_ids: Vec<_> = second.items.iter().map(|a| a.id).collect();
    assert_eq!(first_ids, second_ids);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn list_recent_requires_an_asset(pool: PgPool) {
    seed_artwork(&pool, "With Asset", "VAN_GOGH").await;

    // A bare artwork row with no asset must not appear in new drops.
    sqlx::query(
        "INSERT INTO artworks (title, artist, style_key, status, thumbnail_url) \
         VALUES ('Bare', 'Nobody', 'MONET', 'PUBLISHED', 'https://blob.test/bare.png')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let recent = ArtworkRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "With Asset");
}
