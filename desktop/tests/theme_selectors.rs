#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that the CSS classes used by the studio view, the share panel and the
  header remain present in the shared theme `ui/assets/theme/main.css`.
- Fail fast if a refactor drops or renames a class, instead of shipping an
  unstyled embedded desktop build.

A substring presence check is enough here; if you rename a selector, update the
component markup and REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Header
    ".app-header",
    ".app-header__brand",
    ".app-header__locale",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".button--active",
    // Studio
    ".studio__error",
    ".studio__presets",
    ".studio__cards",
    ".studio-card",
    ".studio-card__heading",
    ".studio-card__readout",
    ".studio-card__caption",
    // Share panel
    ".share-panel",
    ".share-panel__actions",
    ".share-panel__intents",
    ".share-panel__intent",
    ".share-preview",
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
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 3_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn share_status_variants_are_paired() {
    let has_success = THEME_CSS.contains(".share-panel__status--success");
    let has_error = THEME_CSS.contains(".share-panel__status--error");
    assert!(
        has_success && has_error,
        "Share status modifiers missing (success: {has_success}, error: {has_error})"
    );
}
