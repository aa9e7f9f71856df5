//! Variant plan: target widths, encodings, and width-based price tiers.
//!
//! A derive run produces one variant per configured width x format pair.
//! The plan is pure data; the actual decode/resize/encode work lives in
//! the pipeline crate.

use crate::canvas::CanvasSize;
use crate::error::CoreError;

/// Pixel widths produced for every artwork, smallest first. The smallest
/// width is the "medium" display tier used for thumbnails.
pub const VARIANT_WIDTHS: &[u32] = &[1024, 2048];

/// JPEG encode quality for derived variants.
pub const JPEG_QUALITY: u8 = 92;

/// Tags that mark diagnostic records; rows carrying one never appear in
/// normal catalog listings.
pub const RESERVED_TAGS: &[&str] = &["smoketest", "placeholder"];

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// Encodings produced for every configured width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantFormat {
    Png,
    Jpg,
    Webp,
}

impl VariantFormat {
    /// All formats, in plan order.
    pub const ALL: &'static [Self] = &[Self::Png, Self::Jpg, Self::Webp];

    /// Persisted catalog value, e.g. `PNG`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
            Self::Webp => "WEBP",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// MIME type for uploads.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Parse a persisted catalog value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "PNG" => Ok(Self::Png),
            "JPG" => Ok(Self::Jpg),
            "WEBP" => Ok(Self::Webp),
            other => Err(CoreError::Validation(format!(
                "Unknown variant format '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Price tier for a variant, as a step function of its width.
///
/// Monotonic: a wider variant never costs less than a narrower one.
pub fn price_cents_for_width(width: u32) -> i64 {
    if width >= 4096 {
        9900
    } else if width >= 2048 {
        4900
    } else {
        1900
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One planned derivative: target dimensions, encoding, and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub width: u32,
    pub height: u32,
    pub format: VariantFormat,
    pub price_cents: i64,
}

/// Build the derivative plan for one canvas using the default widths.
pub fn plan_variants(canvas: CanvasSize) -> Vec<VariantSpec> {
    plan_for_widths(VARIANT_WIDTHS, canvas)
}

/// Build the derivative plan for one canvas from a configured width list.
///
/// Widths are crossed with formats in a fixed order (widths outer, formats
/// inner). Square canvases produce square variants via a cover crop; a
/// non-square canvas keeps its aspect ratio, scaling height from width.
pub fn plan_for_widths(widths: &[u32], canvas: CanvasSize) -> Vec<VariantSpec> {
    widths
        .iter()
        .flat_map(|&width| {
            let height = if canvas.is_square() {
                width
            } else {
                (width as u64 * canvas.height as u64 / canvas.width as u64) as u32
            };
            VariantFormat::ALL.iter().map(move |&format| VariantSpec {
                width,
                height,
                format,
                price_cents: price_cents_for_width(width),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
