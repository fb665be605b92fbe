//! Week-grid statistics and per-cell classification.

use serde::{Deserialize, Serialize};

use crate::core::life::{LifeProfile, MAX_YEARS_DISPLAYED, WEEKS_PER_YEAR};

/// What a single week cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Filled,
    Upcoming,
    Beyond,
    Hidden,
}

impl CellKind {
    /// Classify the 1-based global week index. Pure: nothing but the
    /// arguments decides the outcome.
    pub fn classify(index: u64, weeks_lived: u64, expectancy_weeks: u64, show_beyond: bool) -> Self {
        if index <= weeks_lived {
            CellKind::Filled
        } else if index > expectancy_weeks {
            if show_beyond {
                CellKind::Beyond
            } else {
                CellKind::Hidden
            }
        } else {
            CellKind::Upcoming
        }
    }

    pub fn is_drawn(self) -> bool {
        self != CellKind::Hidden
    }
}

/// Statistics behind the week grid; recomputed on every date or name change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub weeks_lived: u64,
    pub days_lived: u64,
    pub expectancy_weeks: u64,
    pub expectancy_years: f64,
    pub show_beyond: bool,
    pub total_years: u32,
    pub display_name: Option<String>,
    pub title: String,
}

impl GridStats {
    pub fn from_profile(profile: &LifeProfile, title: impl Into<String>) -> Self {
        let weeks_lived = profile.weeks_lived();
        let expectancy_years = profile.expectancy.capped_years().max(0.0);
        let expectancy_weeks = (expectancy_years * WEEKS_PER_YEAR as f64).floor() as u64;
        Self {
            weeks_lived,
            days_lived: profile.days_lived(),
            expectancy_weeks,
            expectancy_years,
            show_beyond: weeks_lived > expectancy_weeks,
            total_years: grid_rows(expectancy_years, weeks_lived),
            display_name: profile.display_name.clone(),
            title: title.into(),
        }
    }

    pub fn total_cells(&self) -> u64 {
        self.total_years as u64 * WEEKS_PER_YEAR as u64
    }

    /// Classification of the cell at zero-based `year` row and `week` column.
    pub fn cell(&self, year: u32, week: u32) -> CellKind {
        let index = year as u64 * WEEKS_PER_YEAR as u64 + week as u64 + 1;
        CellKind::classify(
            index,
            self.weeks_lived,
            self.expectancy_weeks,
            self.show_beyond,
        )
    }

    /// Iterate every cell as `(year, week, kind)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, CellKind)> + '_ {
        (0..self.total_years)
            .flat_map(|year| (0..WEEKS_PER_YEAR).map(move |week| (year, week)))
            .map(|(year, week)| (year, week, self.cell(year, week)))
    }
}

/// Rows needed to show both the expected lifespan and every lived week.
fn grid_rows(expectancy_years: f64, weeks_lived: u64) -> u32 {
    let expectancy_rows = expectancy_years.ceil() as u64;
    let lived_rows = weeks_lived.div_ceil(WEEKS_PER_YEAR as u64);
    expectancy_rows
        .max(lived_rows)
        .min(MAX_YEARS_DISPLAYED as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::life::Expectancy;
    use time::macros::date;

    fn stats(birth: time::Date, years: f64) -> GridStats {
        let profile = LifeProfile::new(birth, date!(2026 - 10 - 16))
            .with_expectancy(Expectancy::new(years));
        GridStats::from_profile(&profile, "My life in weeks")
    }

    #[test]
    fn thirty_year_old_with_default_expectancy() {
        let grid = stats(date!(1996 - 10 - 16), 100.0);
        assert_eq!(grid.weeks_lived, 1565);
        assert_eq!(grid.expectancy_weeks, 5200);
        assert!(!grid.show_beyond);
        assert_eq!(grid.total_years, 100);
    }

    #[test]
    fn newborn_grid_is_all_upcoming() {
        let grid = stats(date!(2026 - 10 - 16), 100.0);
        assert_eq!(grid.weeks_lived, 0);
        assert!(grid.cells().all(|(_, _, kind)| kind == CellKind::Upcoming));
        assert_eq!(grid.cells().count() as u64, grid.total_cells());
    }

    #[test]
    fn fractional_expectancy_rounds_rows_up() {
        let grid = stats(date!(1996 - 10 - 16), 73.3);
        assert_eq!(grid.expectancy_weeks, 3811);
        assert_eq!(grid.total_years, 74);
        // The tail of the last row is past expectancy and hidden.
        assert_eq!(grid.cell(73, 51), CellKind::Hidden);
        assert_eq!(grid.cell(73, 14), CellKind::Upcoming);
    }

    #[test]
    fn outliving_expectancy_shows_beyond_cells() {
        let grid = stats(date!(1926 - 01 - 01), 73.3);
        assert!(grid.show_beyond);
        assert!(grid.total_years > 74);
        assert_eq!(grid.cell(0, 0), CellKind::Filled);
        let last = grid.total_years - 1;
        assert_eq!(grid.cell(last, 51), CellKind::Beyond);
    }

    #[test]
    fn expectancy_is_capped() {
        let grid = stats(date!(1996 - 10 - 16), 150.0);
        assert_eq!(grid.expectancy_years, 123.0);
        assert_eq!(grid.total_years, 123);
    }

    #[test]
    fn show_beyond_iff_lived_past_expectancy() {
        for birth in [
            date!(2026 - 10 - 16),
            date!(1990 - 01 - 01),
            date!(1953 - 06 - 01),
            date!(1903 - 01 - 01),
        ] {
            for years in [0.0, 40.0, 73.3, 100.0] {
                let grid = stats(birth, years);
                assert_eq!(grid.show_beyond, grid.weeks_lived > grid.expectancy_weeks);
                if grid.show_beyond {
                    assert!(grid.cells().all(|(_, _, kind)| kind != CellKind::Hidden));
                } else {
                    assert!(grid.cells().all(|(_, _, kind)| kind != CellKind::Beyond));
                }
            }
        }
    }

    #[test]
    fn every_index_has_exactly_one_class() {
        for index in 1..=200u64 {
            let kind = CellKind::classify(index, 50, 120, false);
            let expected = if index <= 50 {
                CellKind::Filled
            } else if index > 120 {
                CellKind::Hidden
            } else {
                CellKind::Upcoming
            };
            assert_eq!(kind, expected);
            assert_eq!(kind, CellKind::classify(index, 50, 120, false));
        }
    }
}
