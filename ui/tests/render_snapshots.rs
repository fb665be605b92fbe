//! End-to-end snapshot rendering through the public session API.
//!
//! Everything runs on the block glyph face so results do not depend on the
//! fonts installed on the test machine.

use futures::executor::block_on;
use time::macros::date;

use ui::core::LifeProfile;
use ui::render::face::InlineFace;
use ui::render::{
    BundledFace, Fonts, PresetName, RenderSession, StylePreset, Theme, SNAPSHOT_HEIGHT,
    SNAPSHOT_WIDTH,
};

fn english() {
    ui::i18n::init();
    ui::i18n::set_language("en-US").expect("en-US is bundled");
}

fn session(preset: PresetName) -> RenderSession {
    RenderSession::with_parts(
        Theme::bundled(),
        StylePreset::named(preset),
        Fonts::block(),
        Box::new(BundledFace),
    )
}

fn profile() -> LifeProfile {
    LifeProfile::new(date!(1990 - 03 - 15), date!(2024 - 06 - 01)).with_name("Ada")
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let decoder = png::Decoder::new(bytes);
    let reader = decoder.read_info().expect("valid png header");
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn nothing_to_render_before_a_profile_is_applied() {
    let session = session(PresetName::Story);
    assert!(block_on(session.render_clock()).expect("no error").is_none());
    assert!(session.render_grid().expect("no error").is_none());
}

#[test]
fn clock_and_grid_encode_as_portrait_pngs() {
    english();
    let session = session(PresetName::Story);
    session.apply(&profile());

    let clock = block_on(session.render_clock())
        .expect("clock renders")
        .expect("statistics present");
    let grid = session
        .render_grid()
        .expect("grid renders")
        .expect("statistics present");

    for snapshot in [&clock, &grid] {
        assert_eq!(snapshot.width(), SNAPSHOT_WIDTH);
        assert_eq!(snapshot.height(), SNAPSHOT_HEIGHT);
        let png = snapshot.encode_png().expect("encodes");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_dimensions(&png), (1080, 1920));
    }
}

#[test]
fn both_presets_render_deterministically() {
    english();
    for preset in [PresetName::Story, PresetName::Balanced] {
        let session = session(preset);
        session.apply(&profile());

        let first = block_on(session.render_clock()).expect("renders").expect("present");
        let second = block_on(session.render_clock()).expect("renders").expect("present");
        assert_eq!(first.to_rgba(), second.to_rgba(), "{preset:?} clock differs");

        let first = session.render_grid().expect("renders").expect("present");
        let second = session.render_grid().expect("renders").expect("present");
        assert_eq!(first.to_rgba(), second.to_rgba(), "{preset:?} grid differs");
    }
}

#[test]
fn unreadable_face_still_produces_a_clock() {
    english();
    let session = RenderSession::with_parts(
        Theme::bundled(),
        StylePreset::story(),
        Fonts::block(),
        Box::new(InlineFace(b"<svg".to_vec())),
    );
    session.apply(&profile());

    let clock = block_on(session.render_clock())
        .expect("face errors are not fatal")
        .expect("present");
    let [r, g, b, a] = clock.pixel(540, 1300).expect("in bounds");
    assert_eq!(a, 255);
    assert!(r > 200 && g > 200 && b > 200, "pivot should stay white");
}

#[test]
fn data_uri_wraps_the_png() {
    english();
    let session = session(PresetName::Balanced);
    session.apply(&profile());
    let grid = session.render_grid().expect("renders").expect("present");
    let uri = grid.data_uri().expect("encodes");
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn clearing_statistics_stops_rendering_and_stales_tickets() {
    english();
    let session = session(PresetName::Story);
    session.apply(&profile());
    let ticket = session.begin_request();
    assert!(session.is_current(ticket));

    session.clear();
    assert!(!session.is_current(ticket));
    assert!(session.render_grid().expect("no error").is_none());
}

#[test]
fn poster_text_carries_no_isolation_marks() {
    english();
    let session = session(PresetName::Story);
    session.apply(&profile());

    let grid = session.grid_stats().expect("statistics present");
    let heading = session.clock_heading().expect("statistics present");
    let share = session.share_text(Some("startnow.life"), true);
    let mut texts = vec![grid.title.clone(), share];
    texts.extend(heading.lines().map(str::to_string));
    texts.extend(session.clock_caption().expect("statistics present"));

    for text in &texts {
        assert!(
            !text.contains(['\u{2068}', '\u{2069}']),
            "isolation marks in {text:?}"
        );
    }
    assert_eq!(grid.title, "Ada's life in weeks");
}
