//! Per-page render state.
//!
//! A session owns the latest statistics, the theme and preset, the loaded
//! fonts and the single clock-face load shared by every clock render. It is
//! single-threaded and meant to live behind an `Rc` in the UI.

use std::cell::{Cell, OnceCell, RefCell};

use super::face::{memoize, BundledFace, FaceSource, SharedFace};
use super::{clock, grid, Fonts, RenderContext, RenderError, Snapshot, StylePreset, Theme};
use crate::core::caption::{self, Heading};
use crate::core::{ClockState, Expectancy, GridStats, LifeProfile};

/// Snapshot of the input generation at the start of a render request.
/// Results whose ticket is no longer current were computed from superseded
/// input and should be dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTicket(u64);

#[derive(Clone, Debug, Default)]
struct Computed {
    display_name: Option<String>,
    clock: Option<ClockState>,
    heading: Option<Heading>,
    grid: Option<GridStats>,
    expectancy: Option<Expectancy>,
}

pub struct RenderSession {
    theme: RefCell<Theme>,
    preset: RefCell<StylePreset>,
    fonts: Fonts,
    face_source: Box<dyn FaceSource>,
    face: OnceCell<SharedFace>,
    computed: RefCell<Computed>,
    generation: Cell<u64>,
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new(Theme::bundled(), StylePreset::default())
    }
}

impl RenderSession {
    pub fn new(theme: Theme, preset: StylePreset) -> Self {
        Self::with_parts(theme, preset, Fonts::load(), Box::new(BundledFace))
    }

    /// Full control over fonts and face source, mostly for tests and
    /// headless exports.
    pub fn with_parts(
        theme: Theme,
        preset: StylePreset,
        fonts: Fonts,
        face_source: Box<dyn FaceSource>,
    ) -> Self {
        Self {
            theme: RefCell::new(theme),
            preset: RefCell::new(preset),
            fonts,
            face_source,
            face: OnceCell::new(),
            computed: RefCell::new(Computed::default()),
            generation: Cell::new(0),
        }
    }

    /// Recompute every statistic from `profile`. In-flight renders become
    /// stale.
    pub fn apply(&self, profile: &LifeProfile) {
        let name = profile.display_name.as_deref();
        let clock = ClockState::from_ratio(profile.life_ratio());
        let grid = GridStats::from_profile(profile, caption::grid_heading(name));
        log::debug!(
            "[render] stats updated: {} weeks lived, clock {}",
            grid.weeks_lived,
            clock.readout
        );
        *self.computed.borrow_mut() = Computed {
            display_name: profile.display_name.clone(),
            heading: Some(caption::clock_heading(name)),
            clock: Some(clock),
            grid: Some(grid),
            expectancy: Some(profile.expectancy.clone()),
        };
        self.bump();
    }

    /// Forget all statistics, e.g. after the birth date became invalid.
    pub fn clear(&self) {
        *self.computed.borrow_mut() = Computed::default();
        self.bump();
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.borrow_mut() = theme;
        self.bump();
    }

    pub fn set_preset(&self, preset: StylePreset) {
        *self.preset.borrow_mut() = preset;
        self.bump();
    }

    pub fn preset(&self) -> StylePreset {
        self.preset.borrow().clone()
    }

    pub fn clock_state(&self) -> Option<ClockState> {
        self.computed.borrow().clock.clone()
    }

    pub fn grid_stats(&self) -> Option<GridStats> {
        self.computed.borrow().grid.clone()
    }

    pub fn clock_heading(&self) -> Option<Heading> {
        self.computed.borrow().heading.clone()
    }

    /// Caption lines for the clock, when statistics are present.
    pub fn clock_caption(&self) -> Option<Vec<String>> {
        let computed = self.computed.borrow();
        let clock = computed.clock.as_ref()?;
        let expectancy = computed.expectancy.as_ref()?;
        Some(caption::clock_caption(clock, expectancy))
    }

    pub fn share_text(&self, host: Option<&str>, include_emoji: bool) -> String {
        let computed = self.computed.borrow();
        caption::share_text(
            computed.display_name.as_deref(),
            computed.clock.as_ref(),
            computed.grid.as_ref(),
            host,
            include_emoji,
        )
    }

    /// Start a render request. The ticket stays current until the
    /// statistics, theme or preset change.
    pub fn begin_request(&self) -> RenderTicket {
        RenderTicket(self.generation.get())
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generation.get() == ticket.0
    }

    fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// The face load, issued on first use and shared afterwards.
    pub fn face(&self) -> SharedFace {
        self.face
            .get_or_init(|| memoize(self.face_source.as_ref()))
            .clone()
    }

    /// Clock poster for the current statistics, `Ok(None)` when there are
    /// none. Waits for the face artwork; a failed face load yields a blank
    /// dial rather than an error.
    pub async fn render_clock(&self) -> Result<Option<Snapshot>, RenderError> {
        let inputs = {
            let computed = self.computed.borrow();
            computed.clock.clone().zip(computed.heading.clone())
        };
        let Some((clock, heading)) = inputs else {
            return Ok(None);
        };

        let face = self.face().await.ok();

        let theme = self.theme.borrow().clone();
        let preset = self.preset.borrow().clone();
        let ctx = RenderContext {
            theme: &theme,
            preset: &preset,
            fonts: &self.fonts,
        };
        clock::render_clock(&ctx, &clock, &heading, face.as_deref()).map(Some)
    }

    /// Grid poster for the current statistics, `Ok(None)` when there are
    /// none.
    pub fn render_grid(&self) -> Result<Option<Snapshot>, RenderError> {
        let Some(stats) = self.grid_stats() else {
            return Ok(None);
        };
        let theme = self.theme.borrow();
        let preset = self.preset.borrow();
        let ctx = RenderContext {
            theme: &*theme,
            preset: &*preset,
            fonts: &self.fonts,
        };
        grid::render_grid(&ctx, &stats).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::english_for_test;
    use crate::render::face::tests::BrokenFace;
    use futures::executor::block_on;
    use std::rc::Rc;
    use time::macros::date;

    fn session_with(face: Box<dyn FaceSource>) -> RenderSession {
        RenderSession::with_parts(Theme::default(), StylePreset::story(), Fonts::block(), face)
    }

    fn profile() -> LifeProfile {
        LifeProfile::new(date!(1996 - 10 - 16), date!(2026 - 10 - 16)).with_name("Ada")
    }

    #[test]
    fn renders_nothing_without_statistics() {
        let session = session_with(Box::new(BundledFace));
        assert!(block_on(session.render_clock()).expect("render").is_none());
        assert!(session.render_grid().expect("render").is_none());
        assert!(session.clock_caption().is_none());
    }

    #[test]
    fn apply_fills_every_statistic() {
        let _guard = english_for_test();
        let session = session_with(Box::new(BundledFace));
        session.apply(&profile());
        let grid = session.grid_stats().expect("grid");
        assert_eq!(grid.weeks_lived, 1565);
        assert_eq!(grid.title, "Ada's life in weeks");
        let heading = session.clock_heading().expect("heading");
        assert_eq!(heading.line1, "Ada's life");
        assert_eq!(session.clock_caption().map(|lines| lines.len()), Some(2));

        session.clear();
        assert!(session.grid_stats().is_none());
    }

    #[test]
    fn input_changes_make_tickets_stale() {
        let _guard = english_for_test();
        let session = session_with(Box::new(BundledFace));
        let clock = session.begin_request();
        let grid = session.begin_request();
        assert!(session.is_current(clock));
        assert!(session.is_current(grid));

        session.apply(&profile());
        assert!(!session.is_current(clock));
        let fresh = session.begin_request();
        assert!(session.is_current(fresh));

        session.set_preset(StylePreset::balanced());
        assert!(!session.is_current(fresh));
    }

    #[test]
    fn face_failure_still_renders_and_is_loaded_once() {
        let _guard = english_for_test();
        let calls = Rc::new(Cell::new(0));
        let session = session_with(Box::new(BrokenFace {
            calls: Rc::clone(&calls),
        }));
        session.apply(&profile());
        let first = block_on(session.render_clock()).expect("render").expect("stats");
        let second = block_on(session.render_clock()).expect("render").expect("stats");
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!((first.width(), first.height()), (1080, 1920));
    }

    #[test]
    fn grid_renders_are_pixel_identical() {
        let _guard = english_for_test();
        let session = session_with(Box::new(BundledFace));
        session.apply(&profile());
        let a = session.render_grid().expect("render").expect("stats");
        let b = session.render_grid().expect("render").expect("stats");
        assert_eq!(a.to_rgba(), b.to_rgba());
    }
}
