#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure the CSS selectors the dashboard components emit remain present in the
  shared theme `ui/assets/theme/main.css`.
- Fail fast if a refactor drops or renames a class, instead of shipping an
  unstyled desktop build.

If you rename or remove a selector, update the component markup and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".app {",
    ".page {",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--info",
    ".button--export",
    // Dashboard page
    ".dashboard__notice",
    ".dashboard__actions",
    ".dashboard__api",
    // Cards
    ".segment-card",
    ".segment-card__header",
    ".segment-card__meta",
    ".segment-card__placeholder",
    // Summary
    ".segment-summary__items",
    ".segment-summary__label",
    ".segment-summary__value",
    // Sync status
    ".segment-status--error",
    ".segment-status--notice",
    // Export
    ".segment-export",
    ".segment-export__meta--success",
    ".segment-export__meta--error",
    // Charts
    ".segment-chart__svg",
    ".segment-chart__label",
    ".segment-chart__grid",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn both_theme_variants_define_the_same_tokens() {
    let block = |selector: &str| -> Vec<String> {
        let start = THEME_CSS
            .find(selector)
            .unwrap_or_else(|| panic!("{selector} block missing"));
        let body = &THEME_CSS[start..];
        let end = body.find('}').expect("unterminated block");
        body[..end]
            .lines()
            .filter_map(|line| line.trim().split_once(':').map(|(name, _)| name.to_string()))
            .filter(|name| name.starts_with("--"))
            .collect()
    };

    let dark = block(".theme-dark {");
    let light = block(".theme-light {");
    assert!(!dark.is_empty());
    assert_eq!(dark, light, "theme variants drifted apart");
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 3_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}
