use dioxus::prelude::*;

use ui::views::AppHeader;
use ui::{Studio, StudioConfig};

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global language code; the header writes it, the keyed studio remounts on change.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        AppHeader {}
        div {
            key: "{lang_code()}",
            Studio { config: StudioConfig::default() }
        }
    }
}
