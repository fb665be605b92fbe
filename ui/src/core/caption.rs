//! Headings, summaries and captions shown next to (and painted onto) the
//! snapshots. All wording comes from the Fluent bundles.

use serde::{Deserialize, Serialize};

use crate::core::clock::ClockState;
use crate::core::format::{format_years, group_thousands};
use crate::core::grid::GridStats;
use crate::core::life::{Expectancy, EXPECTANCY_SOURCE};
use crate::t;

/// Host shown in share text when the page location is unknown.
pub const DEFAULT_SHARE_HOST: &str = "startnow.life";

/// A heading pre-split onto at most two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub line1: String,
    pub line2: Option<String>,
}

impl Heading {
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            line1: line.into(),
            line2: None,
        }
    }

    pub fn two_lines(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: Some(line2.into()),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.line1.as_str()).chain(self.line2.as_deref())
    }
}

/// Possessive owner label: "Ada's", "Charles'" or the localized "My".
pub fn owner_label(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => t!("owner-default"),
        Some(name) if name.ends_with('s') => t!("owner-named-s", name = name),
        Some(name) => t!("owner-named", name = name),
    }
}

pub fn clock_heading(name: Option<&str>) -> Heading {
    let owner = owner_label(name);
    Heading::two_lines(
        t!("clock-heading-line1", owner = owner),
        t!("clock-heading-line2"),
    )
}

pub fn grid_heading(name: Option<&str>) -> String {
    t!("grid-heading", owner = owner_label(name))
}

/// "1,565 weeks lived (10,957 days)"
pub fn weeks_summary(grid: &GridStats) -> String {
    t!(
        "grid-summary",
        weeks = group_thousands(grid.weeks_lived),
        days = group_thousands(grid.days_lived)
    )
}

/// Caption lines under the clock: the expectancy sentence (with a beyond
/// note when the clock has rolled past midnight) and its source.
pub fn clock_caption(clock: &ClockState, expectancy: &Expectancy) -> Vec<String> {
    let sentence = t!("clock-caption", years = format_years(expectancy.years));
    let first = if clock.is_beyond_expectancy() {
        format!("{} {sentence}", t!("clock-caption-beyond"))
    } else {
        sentence
    };
    let source = match expectancy.last_update.as_deref() {
        Some(updated) => t!(
            "clock-caption-source-updated",
            source = EXPECTANCY_SOURCE,
            updated = updated
        ),
        None => t!("clock-caption-source", source = EXPECTANCY_SOURCE),
    };
    vec![first, source]
}

/// Social caption accompanying a shared snapshot. Emoji markers are only
/// added where the target renders them well.
pub fn share_text(
    name: Option<&str>,
    clock: Option<&ClockState>,
    grid: Option<&GridStats>,
    host: Option<&str>,
    include_emoji: bool,
) -> String {
    let readout = clock.map_or("xx:xx", |c| c.readout.as_str());
    let weeks = grid.map_or_else(|| "—".to_string(), |g| group_thousands(g.weeks_lived));
    let (time_mark, week_mark) = if include_emoji {
        ("⏰ ", "📅 ")
    } else {
        ("", "")
    };
    t!(
        "share-text",
        owner = owner_label(name),
        readout = format!("{time_mark}{readout}"),
        week = format!("{week_mark}{}", t!("share-week", weeks = weeks)),
        host = host.filter(|h| !h.is_empty()).unwrap_or(DEFAULT_SHARE_HOST)
    )
}
