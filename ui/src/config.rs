//! Launch-time configuration of the studio view.
//!
//! Desktop builds read overrides from the environment; the web build always
//! starts from the sample profile.

use std::str::FromStr;

use time::Date;

use crate::core::life::{parse_birth_date, BirthDateError, DEFAULT_LIFE_EXPECTANCY_YEARS};
use crate::core::{Expectancy, LifeProfile};
use crate::render::PresetName;

pub const SAMPLE_BIRTH_DATE: &str = "1985-04-24";
pub const SAMPLE_NAME: &str = "David";

pub const ENV_BIRTH_DATE: &str = "STARTNOW_BIRTH_DATE";
pub const ENV_NAME: &str = "STARTNOW_NAME";
pub const ENV_PRESET: &str = "STARTNOW_PRESET";
pub const ENV_EXPECTANCY: &str = "STARTNOW_EXPECTANCY";

/// Smallest expectancy accepted from the environment.
pub const MIN_EXPECTANCY_YEARS: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    /// Raw `YYYY-MM-DD`; validated when the profile is built.
    pub birth_date: String,
    pub name: Option<String>,
    pub preset: PresetName,
    pub expectancy_years: f64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            birth_date: SAMPLE_BIRTH_DATE.to_string(),
            name: Some(SAMPLE_NAME.to_string()),
            preset: PresetName::Story,
            expectancy_years: DEFAULT_LIFE_EXPECTANCY_YEARS,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }

    /// Sample profile overridden by whatever `lookup` returns. Unusable
    /// values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_BIRTH_DATE) {
            config.birth_date = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_NAME) {
            let name = raw.trim();
            config.name = (!name.is_empty()).then(|| name.to_string());
        }
        if let Some(raw) = lookup(ENV_PRESET) {
            match PresetName::from_str(&raw) {
                Ok(preset) => config.preset = preset,
                Err(err) => log::warn!("[config] {ENV_PRESET}: {err}"),
            }
        }
        if let Some(raw) = lookup(ENV_EXPECTANCY) {
            match raw.trim().parse::<f64>() {
                Ok(years) if years.is_finite() && years >= MIN_EXPECTANCY_YEARS => {
                    config.expectancy_years = years
                }
                _ => log::warn!(
                    "[config] {ENV_EXPECTANCY}: `{raw}` is not a number of years >= {MIN_EXPECTANCY_YEARS}"
                ),
            }
        }
        config
    }

    pub fn profile(&self, today: Date) -> Result<LifeProfile, BirthDateError> {
        let birth_date = parse_birth_date(&self.birth_date, today)?;
        let profile = LifeProfile::new(birth_date, today)
            .with_expectancy(Expectancy::new(self.expectancy_years));
        Ok(match self.name.as_deref() {
            Some(name) => profile.with_name(name),
            None => profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use time::macros::date;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_the_sample_profile() {
        let config = StudioConfig::from_lookup(|_| None);
        assert_eq!(config, StudioConfig::default());
        let profile = config.profile(date!(2026 - 10 - 16)).expect("valid sample");
        assert_eq!(profile.display_name.as_deref(), Some("David"));
        assert_eq!(profile.birth_date, date!(1985 - 04 - 24));
    }

    #[test]
    fn overrides_apply() {
        let config = StudioConfig::from_lookup(lookup(&[
            (ENV_BIRTH_DATE, " 2000-01-01 "),
            (ENV_NAME, "  "),
            (ENV_PRESET, "balanced"),
            (ENV_EXPECTANCY, "72.5"),
        ]));
        assert_eq!(config.birth_date, "2000-01-01");
        assert_eq!(config.name, None);
        assert_eq!(config.preset, PresetName::Balanced);
        assert_eq!(config.expectancy_years, 72.5);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = StudioConfig::from_lookup(lookup(&[
            (ENV_PRESET, "poster"),
            (ENV_EXPECTANCY, "-3"),
        ]));
        assert_eq!(config.preset, PresetName::Story);
        assert_eq!(config.expectancy_years, DEFAULT_LIFE_EXPECTANCY_YEARS);
    }

    #[test]
    fn tiny_expectancy_is_rejected() {
        let config = StudioConfig::from_lookup(lookup(&[(ENV_EXPECTANCY, "0.000000001")]));
        assert_eq!(config.expectancy_years, DEFAULT_LIFE_EXPECTANCY_YEARS);

        let profile = config.profile(date!(2026 - 10 - 16)).expect("valid sample");
        let clock = crate::core::ClockState::from_ratio(profile.life_ratio());
        assert!(!clock.is_beyond_expectancy());
    }

    #[test]
    fn invalid_birth_dates_surface_when_building_the_profile() {
        let config = StudioConfig {
            birth_date: "2030-01-01".into(),
            ..StudioConfig::default()
        };
        assert!(matches!(
            config.profile(date!(2026 - 10 - 16)),
            Err(BirthDateError::InFuture(_))
        ));
    }
}
