//! Internationalization (i18n) support for `startnow-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/startnow-ui.ftl   (fallback/reference)
//!   de-DE/startnow-ui.ftl
//! ```
//!
//! Every string painted onto a snapshot goes through here, so the renderers
//! themselves never see message ids.
//!
//! Isolation marks are switched off: Fluent would otherwise wrap each
//! placeable in U+2068/U+2069, which the glyph rasterizer has no use for.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Ergonomic translation macro.
/// Examples:
///     t!("studio-title")
///     t!("grid-heading", owner = "Ada's")
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback file path must be: `i18n/en-US/{DOMAIN}.ftl`
const DOMAIN: &str = "startnow-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = select(&requested) {
            log::warn!("[i18n] Failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Load bundles for `languages`. Freshly loaded bundles isolate placeables
/// again, so isolation is switched off after every selection.
fn select(languages: &[LanguageIdentifier]) -> Result<(), i18n_embed::I18nEmbedError> {
    let result = i18n_embed::select(&*LOADER, &Localizations, languages).map(|_| ());
    LOADER.set_use_isolating(false);
    result
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    select(&[lang])
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

/// Serializes tests that pin the global loader to a language.
#[cfg(test)]
pub(crate) static TEST_LANGUAGE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Pin the loader to `en-US` for the duration of the returned guard.
#[cfg(test)]
pub(crate) fn english_for_test() -> std::sync::MutexGuard<'static, ()> {
    let guard = TEST_LANGUAGE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    init();
    set_language("en-US").expect("en-US is embedded");
    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_present() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "de-DE"));
    }

    #[test]
    fn basic_lookup_works() {
        let _guard = english_for_test();
        let s = fl!(&*LOADER, "clock-heading-line2");
        assert_eq!(s, "in hours");
    }

    #[test]
    fn arguments_are_not_isolated() {
        let _guard = english_for_test();
        let s = fl!(&*LOADER, "grid-heading", owner = "Ada's");
        assert_eq!(s, "Ada's life in weeks");
    }

    #[test]
    fn switching_language_keeps_arguments_unisolated() {
        let _guard = TEST_LANGUAGE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        set_language("de-DE").expect("de-DE is embedded");
        let german = fl!(&*LOADER, "grid-summary", weeks = "1.565", days = "10.957");
        set_language("en-US").expect("en-US is embedded");
        let english = fl!(&*LOADER, "grid-summary", weeks = "1,565", days = "10,957");

        for text in [&german, &english] {
            assert!(
                !text.contains(['\u{2068}', '\u{2069}']),
                "isolation marks in {text:?}"
            );
        }
        assert_eq!(english, "1,565 weeks lived (10,957 days)");
        assert_eq!(german, "1.565 Wochen gelebt (10.957 Tage)");
    }

    #[test]
    fn dynamic_language_switch_reverts_on_failure() {
        let _guard = english_for_test();
        let before = fl!(&*LOADER, "owner-default");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "owner-default");
        assert_eq!(before, after);
    }

    #[test]
    fn german_bundle_translates() {
        let _guard = english_for_test();
        set_language("de-DE").expect("de-DE is embedded");
        let s = fl!(&*LOADER, "clock-heading-line2");
        set_language("en-US").expect("en-US is embedded");
        assert_eq!(s, "in Stunden");
    }
}
