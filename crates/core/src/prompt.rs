//! Prompt construction for the image generator.
//!
//! A prompt is the user's title, the style's visual-characteristic rule,
//! and a fixed anti-copying clause. Building is pure and deterministic;
//! the same inputs always yield the same prompt.

use crate::error::CoreError;
use crate::styles::StyleDefinition;

/// Appended verbatim to every prompt, regardless of style.
pub const SAFETY_CLAUSE: &str =
    "Avoid copying any specific copyrighted work; generate a new composition inspired by those traits.";

/// Maximum accepted title length in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Validate a user-supplied title, returning its trimmed form.
///
/// Rejects empty/whitespace-only titles and titles over [`MAX_TITLE_LEN`]
/// characters.
pub fn validate_title(title: &str) -> Result<&str, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Title must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed)
}

/// Build the generation instruction for one title in one style.
pub fn build_prompt(style: &StyleDefinition, title: &str) -> Result<String, CoreError> {
    let title = validate_title(title)?;
    Ok(format!(
        "{title}. Create an original artwork in the stylistic characteristics described: \
         {rule} {SAFETY_CLAUSE}",
        rule = style.prompt_rule,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StyleRegistry;
    use assert_matches::assert_matches;

    fn van_gogh() -> StyleDefinition {
        *StyleRegistry::new().resolve("van-gogh").unwrap()
    }

    // -- build_prompt --

    #[test]
    fn prompt_contains_title_rule_and_safety_clause() {
        let prompt = build_prompt(&van_gogh(), "Starry Harbor Over Canal").unwrap();
        assert!(prompt.starts_with("Starry Harbor Over Canal."));
        assert!(prompt.contains("swirling brush strokes"));
        assert!(prompt.contains(SAFETY_CLAUSE));
    }

    #[test]
    fn safety_clause_present_for_every_style() {
        let registry = StyleRegistry::new();
        for style in registry.ordered() {
            let prompt = build_prompt(style, "A quiet orchard").unwrap();
            assert!(prompt.contains(SAFETY_CLAUSE), "missing clause for {}", style.key);
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let style = van_gogh();
        let a = build_prompt(&style, "Harbor at dusk").unwrap();
        let b = build_prompt(&style, "Harbor at dusk").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn title_is_trimmed() {
        let prompt = build_prompt(&van_gogh(), "  Harbor at dusk  ").unwrap();
        assert!(prompt.starts_with("Harbor at dusk."));
    }

    // -- validate_title --

    #[test]
    fn empty_title_rejected() {
        assert_matches!(validate_title(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn whitespace_only_title_rejected() {
        assert_matches!(validate_title("   \t "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_title_rejected() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert_matches!(validate_title(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn max_length_title_accepted() {
        let max = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&max).is_ok());
    }
}
