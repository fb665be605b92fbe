//! Birth date handling and the life statistics every snapshot is derived from.
//!
//! All arithmetic is done on calendar dates (no time of day): "today" is the
//! caller's local date and the birth date is taken at midnight, so a person
//! born today has lived zero days.

use thiserror::Error;
use time::{macros::format_description, Date, Month, OffsetDateTime};

/// Oldest age the input accepts (years before today's year, January 1st).
pub const MAX_AGE_YEARS: i32 = 123;
/// Rows the grid may ever show; expectancy is capped at the same value.
pub const MAX_YEARS_DISPLAYED: u32 = 123;
pub const WEEKS_PER_YEAR: u32 = 52;
/// Mean Gregorian year length used for fractional ages.
pub const DAYS_PER_YEAR: f64 = 365.2425;
/// Fallback when no expectancy statistic is supplied.
pub const DEFAULT_LIFE_EXPECTANCY_YEARS: f64 = 100.0;
pub const EXPECTANCY_SOURCE: &str = "World Bank global average";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BirthDateError {
    #[error("birth date must look like YYYY-MM-DD")]
    Malformed,
    #[error("birth date {0} lies in the future")]
    InFuture(Date),
    #[error("birth date {given} is before the earliest supported date {earliest}")]
    TooEarly { given: Date, earliest: Date },
}

/// Today's date in the local offset, falling back to UTC when the local
/// offset cannot be determined.
pub fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Earliest birth date accepted relative to `today`.
pub fn earliest_birth_date(today: Date) -> Date {
    Date::from_calendar_date(today.year() - MAX_AGE_YEARS, Month::January, 1).unwrap_or(Date::MIN)
}

/// Parse and validate an ISO `YYYY-MM-DD` birth date.
pub fn parse_birth_date(raw: &str, today: Date) -> Result<Date, BirthDateError> {
    let date = Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| BirthDateError::Malformed)?;
    if date > today {
        return Err(BirthDateError::InFuture(date));
    }
    let earliest = earliest_birth_date(today);
    if date < earliest {
        return Err(BirthDateError::TooEarly {
            given: date,
            earliest,
        });
    }
    Ok(date)
}

/// Life expectancy statistic plus the label of its last revision, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectancy {
    pub years: f64,
    pub last_update: Option<String>,
}

impl Expectancy {
    pub fn new(years: f64) -> Self {
        Self {
            years,
            last_update: None,
        }
    }

    pub fn with_last_update(mut self, label: impl Into<String>) -> Self {
        self.last_update = Some(label.into());
        self
    }

    /// Expectancy clamped to what the grid can display.
    pub fn capped_years(&self) -> f64 {
        self.years.min(MAX_YEARS_DISPLAYED as f64)
    }
}

impl Default for Expectancy {
    fn default() -> Self {
        Self::new(DEFAULT_LIFE_EXPECTANCY_YEARS)
    }
}

/// Everything the statistics need: who, born when, measured on which day.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeProfile {
    pub birth_date: Date,
    pub today: Date,
    pub display_name: Option<String>,
    pub expectancy: Expectancy,
}

impl LifeProfile {
    pub fn new(birth_date: Date, today: Date) -> Self {
        Self {
            birth_date,
            today,
            display_name: None,
            expectancy: Expectancy::default(),
        }
    }

    /// Attach a display name; blank names are treated as absent.
    pub fn with_name(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_expectancy(mut self, expectancy: Expectancy) -> Self {
        self.expectancy = expectancy;
        self
    }

    pub fn days_lived(&self) -> u64 {
        (self.today - self.birth_date).whole_days().max(0) as u64
    }

    pub fn weeks_lived(&self) -> u64 {
        self.days_lived() / 7
    }

    pub fn age_years(&self) -> f64 {
        self.days_lived() as f64 / DAYS_PER_YEAR
    }

    /// Fraction of the expected lifespan already lived; exceeds 1 past expectancy.
    pub fn life_ratio(&self) -> f64 {
        if self.expectancy.years <= 0.0 {
            return 0.0;
        }
        self.age_years() / self.expectancy.years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_valid_dates() {
        let today = date!(2026 - 10 - 16);
        assert_eq!(
            parse_birth_date("1985-04-24", today),
            Ok(date!(1985 - 04 - 24))
        );
        assert_eq!(parse_birth_date(" 2026-10-16 ", today), Ok(today));
    }

    #[test]
    fn rejects_bad_dates() {
        let today = date!(2026 - 10 - 16);
        assert_eq!(
            parse_birth_date("1985-02-30", today),
            Err(BirthDateError::Malformed)
        );
        assert_eq!(parse_birth_date("", today), Err(BirthDateError::Malformed));
        assert!(matches!(
            parse_birth_date("2026-10-17", today),
            Err(BirthDateError::InFuture(_))
        ));
        assert!(matches!(
            parse_birth_date("1902-12-31", today),
            Err(BirthDateError::TooEarly { .. })
        ));
        assert!(parse_birth_date("1903-01-01", today).is_ok());
    }

    #[test]
    fn thirty_years_is_1565_weeks() {
        let today = date!(2026 - 10 - 16);
        let profile = LifeProfile::new(date!(1996 - 10 - 16), today);
        assert_eq!(profile.weeks_lived(), 1565);
        assert!((profile.age_years() - 30.0).abs() < 0.01);
        assert!((profile.life_ratio() - 0.3).abs() < 0.001);
    }

    #[test]
    fn born_today_has_lived_nothing() {
        let today = date!(2026 - 10 - 16);
        let profile = LifeProfile::new(today, today);
        assert_eq!(profile.days_lived(), 0);
        assert_eq!(profile.weeks_lived(), 0);
        assert_eq!(profile.life_ratio(), 0.0);
    }

    #[test]
    fn blank_names_are_dropped() {
        let today = date!(2026 - 10 - 16);
        let profile = LifeProfile::new(today, today).with_name("   ");
        assert_eq!(profile.display_name, None);
        let profile = profile.with_name("  Ada ");
        assert_eq!(profile.display_name.as_deref(), Some("Ada"));
    }
}
