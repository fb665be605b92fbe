//! Getting a finished snapshot off the page: save, native share, social
//! intents.

mod panel;

pub use panel::SharePanel;

use url::Url;

pub const CLOCK_FILENAME: &str = "life-clock-9x16.png";
pub const GRID_FILENAME: &str = "life-grid-9x16.png";
const PNG_MIME: &str = "image/png";

const X_INTENT: &str = "https://twitter.com/intent/tweet";
const THREADS_INTENT: &str = "https://www.threads.net/intent/post";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    Clock,
    Grid,
}

impl SnapshotKind {
    pub fn filename(self) -> &'static str {
        match self {
            SnapshotKind::Clock => CLOCK_FILENAME,
            SnapshotKind::Grid => GRID_FILENAME,
        }
    }
}

/// How an export reached the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Written to disk at this path.
    Saved(String),
    /// Handed to the browser as a download.
    Downloaded,
    /// Accepted by the platform share sheet.
    Shared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialTarget {
    X,
    Threads,
}

impl SocialTarget {
    /// X renders emoji markers nicely; Threads gets plain text.
    pub fn wants_emoji(self) -> bool {
        matches!(self, SocialTarget::X)
    }

    /// Prefilled compose URL for `text`, linking back to `page_url`.
    pub fn intent_url(self, text: &str, page_url: &str) -> String {
        match self {
            SocialTarget::X => x_intent_url(text, page_url),
            SocialTarget::Threads => threads_intent_url(text, page_url),
        }
    }
}

pub fn x_intent_url(text: &str, page_url: &str) -> String {
    Url::parse_with_params(X_INTENT, [("text", text), ("url", page_url)])
        .map(String::from)
        .unwrap_or_else(|_| X_INTENT.to_string())
}

/// Threads has no separate link parameter; the link trails the text.
pub fn threads_intent_url(text: &str, page_url: &str) -> String {
    let body = if page_url.is_empty() {
        text.to_string()
    } else {
        format!("{text} {page_url}")
    };
    Url::parse_with_params(THREADS_INTENT, [("text", body.as_str())])
        .map(String::from)
        .unwrap_or_else(|_| THREADS_INTENT.to_string())
}

/// Address of the running page, used as the share link.
pub fn page_url() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().href().ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Host of the running page, shown in the share text.
pub fn page_host() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().host().ok())
            .filter(|host| !host.is_empty())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Save PNG bytes: a browser download on the web, a file in the per-user
/// export directory on desktop.
pub async fn save_png(filename: &str, bytes: Vec<u8>) -> Result<Delivery, String> {
    download_bytes(filename, PNG_MIME, bytes).await
}

/// Offer PNG bytes to the platform share sheet, falling back to
/// [`save_png`] where sharing files is unsupported or the share fails.
pub async fn share_png(
    filename: &str,
    bytes: Vec<u8>,
    title: &str,
    text: &str,
) -> Result<Delivery, String> {
    #[cfg(target_arch = "wasm32")]
    {
        match web::share_file(filename, &bytes, title, text).await {
            Ok(true) => return Ok(Delivery::Shared),
            Ok(false) => log::debug!("[share] file sharing unsupported; downloading"),
            Err(err) => log::warn!("[share] share sheet failed ({err}); downloading"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (title, text);
        log::debug!("[share] no share sheet on desktop; saving {filename}");
    }

    save_png(filename, bytes).await
}

async fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Delivery, String> {
    #[cfg(target_arch = "wasm32")]
    {
        web::download(filename, mime, &bytes)?;
        Ok(Delivery::Downloaded)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = desktop_export_dir()?;
        write_export(&dir, filename, &bytes).map(Delivery::Saved)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("life", "Startnow", "Startnow")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_export(dir: &std::path::Path, filename: &str, bytes: &[u8]) -> Result<String, String> {
    std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|err| err.to_string())?;
    log::debug!("[share] wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_string_lossy().to_string())
}

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag, HtmlAnchorElement, Url};

    fn byte_parts(bytes: &[u8]) -> Array {
        let array = Uint8Array::from(bytes);
        let parts = Array::new();
        parts.push(&array.buffer());
        parts
    }

    pub(super) fn download(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&byte_parts(bytes), &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();
        Ok(())
    }

    fn method(target: &JsValue, name: &str) -> Option<Function> {
        Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    }

    /// `Ok(false)` when the browser cannot share files at all.
    pub(super) async fn share_file(
        filename: &str,
        bytes: &[u8],
        title: &str,
        text: &str,
    ) -> Result<bool, String> {
        let window = web_sys::window().ok_or("window unavailable")?;
        let navigator: JsValue = window.navigator().into();
        let (Some(can_share), Some(share)) = (method(&navigator, "canShare"), method(&navigator, "share"))
        else {
            return Ok(false);
        };

        let opts = FilePropertyBag::new();
        opts.set_type(super::PNG_MIME);
        let file = File::new_with_u8_array_sequence_and_options(&byte_parts(bytes), filename, &opts)
            .map_err(|_| "Failed to create file".to_string())?;

        let payload = Object::new();
        let set = |key: &str, value: &JsValue| {
            Reflect::set(&payload, &JsValue::from_str(key), value)
                .map(|_| ())
                .map_err(|_| format!("Unable to set share {key}"))
        };
        set("files", &Array::of1(&file))?;
        set("title", &JsValue::from_str(title))?;
        set("text", &JsValue::from_str(text))?;

        let allowed = can_share
            .call1(&navigator, &payload)
            .map(|value| value.as_bool().unwrap_or(false))
            .unwrap_or(false);
        if !allowed {
            return Ok(false);
        }

        let promise: Promise = share
            .call1(&navigator, &payload)
            .map_err(|err| format!("{err:?}"))?
            .dyn_into()
            .map_err(|_| "share() did not return a promise".to_string())?;
        JsFuture::from(promise)
            .await
            .map(|_| true)
            .map_err(|err| format!("{err:?}"))
    }
}
