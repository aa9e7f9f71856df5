//! Variant rendering: decode once, cover-resize, re-encode per spec.
//!
//! Rendering is deterministic for identical input bytes and specs. All
//! functions here are synchronous and CPU-bound; the pipeline runs them
//! on blocking tasks.

use std::io::Cursor;

use atelier_core::variants::{VariantFormat, VariantSpec, JPEG_QUALITY};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

/// Errors from variant rendering.
#[derive(Debug, thiserror::Error)]
pub enum DerivativeError {
    /// The synthesized bytes are not a decodable image.
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    /// Re-encoding one variant failed.
    #[error("Failed to encode {width}px {format} variant: {message}")]
    Encode {
        width: u32,
        format: &'static str,
        message: String,
    },
}

/// Decode the synthesized original. Done once per run; the result is
/// shared across all variant renders.
pub fn decode_source(bytes: &[u8]) -> Result<DynamicImage, DerivativeError> {
    image::load_from_memory(bytes).map_err(|e| DerivativeError::Decode(e.to_string()))
}

/// Render one variant: cover-resize to the spec's dimensions (crops
/// whatever overflows the target ratio) and encode to the spec's format.
pub fn render_variant(source: &DynamicImage, spec: &VariantSpec) -> Result<Vec<u8>, DerivativeError> {
    let resized = source.resize_to_fill(spec.width, spec.height, FilterType::Lanczos3);
    encode(&resized, spec)
}

fn encode(image: &DynamicImage, spec: &VariantSpec) -> Result<Vec<u8>, DerivativeError> {
    let mut buf = Vec::new();
    let result = match spec.format {
        VariantFormat::Png => image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
        // JPEG has no alpha channel; flatten before encoding.
        VariantFormat::Jpg => image
            .to_rgb8()
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)),
        // The webp encoder is lossless-only.
        VariantFormat::Webp => image
            .to_rgba8()
            .write_with_encoder(WebPEncoder::new_lossless(&mut buf)),
    };

    result.map_err(|e| DerivativeError::Encode {
        width: spec.width,
        format: spec.format.as_str(),
        message: e.to_string(),
    })?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
