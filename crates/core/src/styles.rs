//! Style registry: canonical keys, slugs, labels, and prompt rules for the
//! ten supported master styles.
//!
//! The registry is built once at process start ([`StyleRegistry::new`]) and
//! passed by reference into the prompt builder and the catalog layer. Slug
//! resolution is case-insensitive, accent-folded, and alias-aware; unknown
//! slugs are an error, never a silent default.

use crate::error::CoreError;

/// One registered artistic style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDefinition {
    /// Canonical persisted key, e.g. `VAN_GOGH`.
    pub key: &'static str,
    /// URL-safe slug, e.g. `van-gogh`.
    pub slug: &'static str,
    /// Display label, e.g. `Vincent van Gogh`.
    pub label: &'static str,
    /// Style-specific visual characteristics fed to the prompt builder.
    pub prompt_rule: &'static str,
}

/// All registered styles, in presentation order (the order carousels and
/// the explore directory list them).
const STYLES: &[StyleDefinition] = &[
    StyleDefinition {
        key: "DA_VINCI",
        slug: "da-vinci",
        label: "Leonardo da Vinci",
        prompt_rule:
            "Renaissance chiaroscuro, sfumato transitions, precise proportions, subtle harmonious palette",
    },
    StyleDefinition {
        key: "VAN_GOGH",
        slug: "van-gogh",
        label: "Vincent van Gogh",
        prompt_rule:
            "post-impressionist, heavy impasto, swirling brush strokes, vivid complementary colors, starry glow",
    },
    StyleDefinition {
        key: "PICASSO",
        slug: "picasso",
        label: "Pablo Picasso",
        prompt_rule:
            "cubist abstraction, fractured perspective, geometric planes, bold simplified forms",
    },
    StyleDefinition {
        key: "VERMEER",
        slug: "vermeer",
        label: "Johannes Vermeer",
        prompt_rule:
            "Dutch Golden Age, camera obscura realism, soft window light, cool interiors, pearl highlights",
    },
    StyleDefinition {
        key: "MONET",
        slug: "monet",
        label: "Claude Monet",
        prompt_rule:
            "impressionist plein-air, broken color, shimmering reflections, atmospheric perspective",
    },
    StyleDefinition {
        key: "MICHELANGELO",
        slug: "michelangelo",
        label: "Michelangelo",
        prompt_rule:
            "High Renaissance heroic anatomy, marble-like forms, dramatic contrapposto, monumental scale",
    },
    StyleDefinition {
        key: "DALI",
        slug: "dali",
        label: "Salvador Dalí",
        prompt_rule:
            "surrealist dream logic, hyperreal textures, melting transformations, desert horizons",
    },
    StyleDefinition {
        key: "CARAVAGGIO",
        slug: "caravaggio",
        label: "Caravaggio",
        prompt_rule:
            "tenebrism, dramatic chiaroscuro, theatrical staging, lifelike textures, intense realism",
    },
    StyleDefinition {
        key: "REMBRANDT",
        slug: "rembrandt",
        label: "Rembrandt",
        prompt_rule:
            "baroque chiaroscuro, warm earth palette, rich impasto highlights, introspective mood",
    },
    StyleDefinition {
        key: "POLLOCK",
        slug: "pollock",
        label: "Jackson Pollock",
        prompt_rule:
            "abstract expressionist action painting, layered drips and splatters, gestural dynamism",
    },
];

/// Long-form slug aliases accepted in addition to the canonical slugs.
const SLUG_ALIASES: &[(&str, &str)] = &[
    ("leonardo-da-vinci", "DA_VINCI"),
    ("vincent-van-gogh", "VAN_GOGH"),
    ("pablo-picasso", "PICASSO"),
    ("johannes-vermeer", "VERMEER"),
    ("claude-monet", "MONET"),
    ("salvador-dali", "DALI"),
    ("jackson-pollock", "POLLOCK"),
];

/// Immutable lookup table over all registered styles.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: &'static [StyleDefinition],
    aliases: &'static [(&'static str, &'static str)],
}

impl StyleRegistry {
    /// Build the registry. Cheap; callers construct one at startup and
    /// share it by reference.
    pub fn new() -> Self {
        Self {
            styles: STYLES,
            aliases: SLUG_ALIASES,
        }
    }

    /// Resolve a user-supplied slug to its style definition.
    ///
    /// Matching is case-insensitive and accent-folded (`Dalí` resolves the
    /// same as `dali`), and long-form aliases such as `leonardo-da-vinci`
    /// map to the same key as the canonical slug.
    pub fn resolve(&self, slug: &str) -> Result<&StyleDefinition, CoreError> {
        let normalized = normalize_slug(slug);

        if let Some(style) = self.styles.iter().find(|s| s.slug == normalized) {
            return Ok(style);
        }
        if let Some((_, key)) = self.aliases.iter().find(|(alias, _)| *alias == normalized) {
            return self.definition(key);
        }

        Err(CoreError::UnknownStyle(slug.to_string()))
    }

    /// Look up a style by its canonical key.
    pub fn definition(&self, key: &str) -> Result<&StyleDefinition, CoreError> {
        self.styles
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| CoreError::UnknownStyle(key.to_string()))
    }

    /// Display label for a registered key.
    pub fn label(&self, key: &str) -> Result<&'static str, CoreError> {
        self.definition(key).map(|s| s.label)
    }

    /// Canonical slug for a registered key.
    pub fn slug(&self, key: &str) -> Result<&'static str, CoreError> {
        self.definition(key).map(|s| s.slug)
    }

    /// All styles in presentation order.
    pub fn ordered(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase, trim, and strip diacritics from a slug for comparison.
fn normalize_slug(raw: &str) -> String {
    raw.trim().to_lowercase().chars().map(fold_diacritic).collect()
}

/// Map accented Latin characters onto their ASCII base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
