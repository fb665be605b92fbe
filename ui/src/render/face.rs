//! Clock-face artwork: where the SVG comes from and how it is loaded once.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use rust_embed::Embed;
use tiny_skia::{Pixmap, Transform};

use super::RenderError;

pub const BUNDLED_FACE: &str = "clockbase.svg";

#[derive(Embed)]
#[folder = "assets/face"]
struct FaceAssets;

/// Supplies the raw SVG bytes of the clock face.
pub trait FaceSource {
    fn load(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, RenderError>>;
}

/// The face compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledFace;

impl FaceSource for BundledFace {
    fn load(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, RenderError>> {
        async {
            FaceAssets::get(BUNDLED_FACE)
                .map(|file| file.data.into_owned())
                .ok_or_else(|| RenderError::FaceMissing(BUNDLED_FACE.to_string()))
        }
        .boxed_local()
    }
}

/// Caller-provided SVG bytes, e.g. a themed face.
#[derive(Clone, Debug)]
pub struct InlineFace(pub Vec<u8>);

impl FaceSource for InlineFace {
    fn load(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, RenderError>> {
        let bytes = self.0.clone();
        async move { Ok(bytes) }.boxed_local()
    }
}

/// A face load shared by every render of a session. The first poll starts
/// the load; later renders await the same outcome, success or failure.
pub type SharedFace = Shared<LocalBoxFuture<'static, Result<Rc<usvg::Tree>, String>>>;

pub fn parse_face(bytes: &[u8]) -> Result<usvg::Tree, RenderError> {
    usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|err| RenderError::FaceInvalid(err.to_string()))
}

pub fn memoize(source: &dyn FaceSource) -> SharedFace {
    source
        .load()
        .map(|loaded| {
            loaded
                .and_then(|bytes| parse_face(&bytes))
                .map(Rc::new)
                .map_err(|err| {
                    log::warn!("[render] clock face unavailable, drawing a blank dial: {err}");
                    err.to_string()
                })
        })
        .boxed_local()
        .shared()
}

/// Scales the face artwork to fill the disc of `radius` around (`cx`, `cy`).
pub fn draw_face(pixmap: &mut Pixmap, tree: &usvg::Tree, cx: f32, cy: f32, radius: f32) {
    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return;
    }
    let diameter = radius * 2.0;
    let transform = Transform::from_translate(cx - radius, cy - radius)
        .pre_scale(diameter / size.width(), diameter / size.height());
    resvg::render(tree, transform, &mut pixmap.as_mut());
}
