use dioxus::prelude::*;

use crate::config::StudioConfig;
use crate::core::caption::weeks_summary;
use crate::core::life::local_today;
use crate::render::{PresetName, RenderSession, StylePreset, Theme};
use crate::share::{SharePanel, SnapshotKind};
use crate::t;
use crate::views::SessionHandle;

#[cfg(debug_assertions)]
fn log_studio_render(revision: u64) {
    log::debug!("[render] studio render (revision={revision})");
}

#[component]
pub fn Studio(config: StudioConfig) -> Element {
    // Subscribe to the global language code (if provided) so labels refresh.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code.as_ref().map(|s| s());

    let initial_preset = config.preset;
    let session = use_context_provider(|| {
        SessionHandle::new(RenderSession::new(
            Theme::bundled(),
            StylePreset::named(initial_preset),
        ))
    });
    let mut revision = use_signal(|| 0u64);
    let mut input_error = use_signal(|| Option::<String>::None);
    let mut active_preset = use_signal(|| initial_preset);

    {
        let session = session.clone();
        let config = config.clone();
        use_hook(move || match config.profile(local_today()) {
            Ok(profile) => {
                session.apply(&profile);
                revision += 1;
            }
            Err(err) => {
                log::warn!("[render] birth date `{}` rejected: {err}", config.birth_date);
                session.clear();
                input_error.set(Some(err.to_string()));
            }
        });
    }

    let current = revision();
    #[cfg(debug_assertions)]
    {
        log_studio_render(current);
    }

    let readout = session.clock_state().map(|clock| clock.readout);
    let caption = session.clock_caption().unwrap_or_default();
    let heading = session
        .clock_heading()
        .map(|heading| heading.lines().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let grid = session.grid_stats();
    let summary = grid.as_ref().map(weeks_summary);
    let grid_title = grid.as_ref().map(|g| g.title.clone()).unwrap_or_default();

    let mut select_preset = {
        let session = session.clone();
        move |name: PresetName| {
            if active_preset() == name {
                return;
            }
            session.set_preset(StylePreset::named(name));
            active_preset.set(name);
            revision += 1;
        }
    };

    let preset_class = |name: PresetName| {
        if active_preset() == name {
            "button button--ghost button--active"
        } else {
            "button button--ghost"
        }
    };

    rsx! {
        section { class: "page page-studio",
            h1 { {t!("studio-title")} }
            p { {t!("studio-intro")} }

            if let Some(reason) = input_error() {
                p { class: "studio__error", {t!("studio-invalid-date", reason = reason)} }
            }

            div { class: "studio__presets",
                span { class: "studio__presets-label", {t!("studio-preset-label")} }
                button {
                    class: preset_class(PresetName::Story),
                    onclick: {
                        let mut select_preset = select_preset.clone();
                        move |_| select_preset(PresetName::Story)
                    },
                    {t!("studio-preset-story")}
                }
                button {
                    class: preset_class(PresetName::Balanced),
                    onclick: move |_| select_preset(PresetName::Balanced),
                    {t!("studio-preset-balanced")}
                }
            }

            div { class: "studio__cards",
                article { class: "studio-card",
                    h2 { {t!("studio-clock")} }
                    if let Some(readout) = readout {
                        p { class: "studio-card__heading", "{heading}" }
                        p { class: "studio-card__readout", "{readout}" }
                        for line in caption {
                            p { class: "studio-card__caption", "{line}" }
                        }
                    }
                    SharePanel { kind: SnapshotKind::Clock, revision: current }
                }
                article { class: "studio-card",
                    h2 { {t!("studio-grid")} }
                    if let Some(summary) = summary {
                        p { class: "studio-card__heading", "{grid_title}" }
                        p { class: "studio-card__caption", "{summary}" }
                    }
                    SharePanel { kind: SnapshotKind::Grid, revision: current }
                }
            }
        }
    }
}
