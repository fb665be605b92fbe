use dioxus::prelude::*;

use crate::i18n;
use crate::t;

/// Brand bar with the locale switcher.
///
/// When the launcher provides a `Signal<String>` language code the switcher
/// writes the chosen tag into it, so keyed subtrees remount in the new
/// language.
#[component]
pub fn AppHeader() -> Element {
    i18n::init();

    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let mut current_lang =
        use_signal(|| lang_code_ctx.map(|c| c.peek().clone()).unwrap_or_else(|| "en-US".to_string()));
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => log::warn!("[i18n] switching to {val} failed: {err}"),
        }
    };

    rsx! {
        header { class: "app-header",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "app-header__brand",
                span { class: "app-header__mark", "Startnow" }
                span { class: "app-header__tagline", {t!("tagline")} }
            }
            if show_switcher {
                div { class: "app-header__locale",
                    label {
                        class: "visually-hidden",
                        r#for: "locale-select",
                        {t!("nav-language-label")}
                    }
                    select {
                        id: "locale-select",
                        value: "{current_lang()}",
                        oninput: on_change,
                        { langs().iter().map(|code| {
                            let c = code.clone();
                            rsx! {
                                option { key: "{c}", value: "{c}", "{c}" }
                            }
                        })}
                    }
                }
            }
        }
    }
}
