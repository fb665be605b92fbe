use dioxus::prelude::*;

use super::{page_host, page_url, save_png, share_png, Delivery, SnapshotKind, SocialTarget};
use crate::core::caption::DEFAULT_SHARE_HOST;
use crate::render::{RenderSession, Snapshot};
use crate::t;
use crate::views::SessionHandle;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportAction {
    Download,
    Share,
}

/// Download, share, preview and social links for one snapshot kind.
///
/// `revision` changes whenever the session statistics do; an open preview
/// from an older revision is hidden.
#[component]
pub fn SharePanel(kind: SnapshotKind, revision: u64) -> Element {
    let session = use_context::<SessionHandle>();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);
    let mut preview = use_signal(|| Option::<(u64, String)>::None);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "share-panel__status".to_string(),
            format!("{}…", t!("share-working")),
        )),
        ExportStatus::Done(message) => Some((
            "share-panel__status share-panel__status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "share-panel__status share-panel__status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let run = {
        let session = session.clone();
        move |action: ExportAction| {
            let mut status_signal = status;
            let mut busy_signal = busy;
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working);
            let session = session.clone();
            spawn(async move {
                match perform_export(&session, kind, action).await {
                    Ok(Some(message)) => status_signal.set(ExportStatus::Done(message)),
                    Ok(None) => status_signal.set(ExportStatus::Idle),
                    Err(err) => {
                        log::warn!("[share] {} export failed: {err}", kind.filename());
                        status_signal.set(ExportStatus::Error(err));
                    }
                }
                busy_signal.set(false);
            });
        }
    };
    let download_handler = {
        let run = run.clone();
        move |_: MouseEvent| run(ExportAction::Download)
    };
    let share_handler = move |_: MouseEvent| run(ExportAction::Share);

    let preview_src = preview()
        .filter(|(shown_for, _)| *shown_for == revision)
        .map(|(_, uri)| uri);
    let preview_open = preview_src.is_some();

    let preview_handler = {
        let session = session.clone();
        move |_: MouseEvent| {
            if preview_open {
                preview.set(None);
                return;
            }
            let mut status_signal = status;
            let mut preview_signal = preview;
            let session = session.clone();
            spawn(async move {
                let ticket = session.begin_request();
                let rendered = render_snapshot(&session, kind)
                    .await
                    .and_then(|snapshot| snapshot.data_uri().map_err(|err| err.to_string()));
                if !session.is_current(ticket) {
                    return;
                }
                match rendered {
                    Ok(uri) => preview_signal.set(Some((revision, uri))),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
            });
        }
    };

    let page = page_url().unwrap_or_else(|| format!("https://{DEFAULT_SHARE_HOST}/"));
    let host = page_host();
    let x_href = SocialTarget::X.intent_url(
        &session.share_text(host.as_deref(), SocialTarget::X.wants_emoji()),
        &page,
    );
    let threads_href = SocialTarget::Threads.intent_url(
        &session.share_text(host.as_deref(), SocialTarget::Threads.wants_emoji()),
        &page,
    );

    rsx! {
        div { class: "share-panel",
            div { class: "share-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: download_handler,
                    {t!("share-download")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: share_handler,
                    {t!("share-native")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: preview_handler,
                    if preview_open {
                        {t!("share-preview-hide")}
                    } else {
                        {t!("share-preview-show")}
                    }
                }
            }

            div { class: "share-panel__intents",
                a {
                    class: "share-panel__intent",
                    href: "{x_href}",
                    target: "_blank",
                    rel: "noopener",
                    {t!("share-intent-x")}
                }
                a {
                    class: "share-panel__intent",
                    href: "{threads_href}",
                    target: "_blank",
                    rel: "noopener",
                    {t!("share-intent-threads")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }

            if let Some(uri) = preview_src {
                img {
                    class: "share-preview",
                    src: "{uri}",
                    alt: t!("share-preview-alt"),
                }
            }
        }
    }
}

/// Renders `kind` for the current statistics; an error when there are none.
async fn render_snapshot(session: &RenderSession, kind: SnapshotKind) -> Result<Snapshot, String> {
    let rendered = match kind {
        SnapshotKind::Clock => session.render_clock().await,
        SnapshotKind::Grid => session.render_grid(),
    };
    rendered
        .map_err(|err| err.to_string())?
        .ok_or_else(|| t!("share-nothing-yet"))
}

/// `Ok(None)` when the statistics changed while rendering; the result is
/// dropped without a status message.
async fn perform_export(
    session: &RenderSession,
    kind: SnapshotKind,
    action: ExportAction,
) -> Result<Option<String>, String> {
    let ticket = session.begin_request();
    let snapshot = render_snapshot(session, kind).await?;
    if !session.is_current(ticket) {
        log::debug!("[share] dropped stale {} render", kind.filename());
        return Ok(None);
    }
    let bytes = snapshot.encode_png().map_err(|err| err.to_string())?;

    let delivery = match action {
        ExportAction::Download => save_png(kind.filename(), bytes).await?,
        ExportAction::Share => {
            let text = session.share_text(page_host().as_deref(), false);
            share_png(kind.filename(), bytes, &t!("share-title"), &text).await?
        }
    };

    Ok(Some(match delivery {
        Delivery::Saved(path) => t!("share-saved", path = path),
        Delivery::Downloaded => t!("share-download-started"),
        Delivery::Shared => t!("share-shared"),
    }))
}
