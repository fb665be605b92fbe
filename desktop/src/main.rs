#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::views::AppHeader;
use ui::{Studio, StudioConfig};

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Startnow – v{}", env!("CARGO_PKG_VERSION")))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Environment overrides are read once per launch.
    let config = use_hook(StudioConfig::from_env);

    // Global language code; AppHeader updates it on selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        AppHeader {}
        // Keyed wrapper forces a full remount (fresh session, new captions) on language change.
        div {
            key: "{lang_code()}",
            Studio { config: config.clone() }
        }
    }
}
