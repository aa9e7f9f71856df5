//! Canvas size selection for the image generator.
//!
//! The provider accepts a small fixed set of canvas dimensions. Each
//! requested aspect maps to exactly one of them; `auto` is a synonym for
//! square rather than a provider-side decision, so downstream derivative
//! planning always knows the real dimensions.

use std::fmt;

use crate::error::CoreError;

/// Requested aspect ratio for a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    /// 1024x1024.
    #[default]
    Square,
    /// 1024x1536.
    Portrait,
    /// 1536x1024.
    Landscape,
    /// Provider default; fixed to the square canvas.
    Auto,
}

impl Aspect {
    /// Parse a user-supplied aspect string (case-insensitive).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            "auto" | "" => Ok(Self::Auto),
            other => Err(CoreError::Validation(format!(
                "Unknown aspect '{other}'. Must be one of: square, portrait, landscape, auto"
            ))),
        }
    }

    /// The provider canvas this aspect generates at.
    pub fn canvas(self) -> CanvasSize {
        match self {
            Self::Square | Self::Auto => CanvasSize::SQUARE,
            Self::Portrait => CanvasSize::PORTRAIT,
            Self::Landscape => CanvasSize::LANDSCAPE,
        }
    }
}

/// One of the provider's supported canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const SQUARE: Self = Self {
        width: 1024,
        height: 1024,
    };
    pub const PORTRAIT: Self = Self {
        width: 1024,
        height: 1536,
    };
    pub const LANDSCAPE: Self = Self {
        width: 1536,
        height: 1024,
    };

    pub fn is_square(self) -> bool {
        self.width == self.height
    }
}

impl fmt::Display for CanvasSize {
    /// Renders as the provider wire format, e.g. `1024x1024`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
