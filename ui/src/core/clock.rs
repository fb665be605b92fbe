//! Mapping of a life ratio onto a 24-hour analog clock.

use serde::{Deserialize, Serialize};

use crate::core::format::pad2;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Hour and minute hand angles in degrees, clockwise from 12 o'clock.
pub fn hand_angles(hours: u32, minutes: u32) -> (f32, f32) {
    let hour_angle = (hours % 12) as f32 * 30.0 + minutes as f32 * 0.5;
    let minute_angle = minutes as f32 * 6.0;
    (hour_angle, minute_angle)
}

/// Immutable clock reading derived once per render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    pub readout: String,
    pub hour_angle: f32,
    pub minute_angle: f32,
    pub hours: u32,
    pub minutes: u32,
    /// Whole "days" past the first 24 hours, i.e. past the expected lifespan.
    pub day_offset: u32,
}

impl ClockState {
    /// Build the clock for a life ratio. Negative ratios clamp to midnight;
    /// ratios above 1 spill into "Day N".
    pub fn from_ratio(ratio: f64) -> Self {
        let ratio = if ratio.is_finite() { ratio.max(0.0) } else { 0.0 };
        let total_minutes = ratio * MINUTES_PER_DAY;
        let day_offset = (total_minutes / MINUTES_PER_DAY).floor();
        // Huge ratios lose precision; keep the reading inside one day.
        let minutes_in_day =
            (total_minutes - day_offset * MINUTES_PER_DAY).clamp(0.0, MINUTES_PER_DAY - 1.0);
        let hours = (minutes_in_day / 60.0).floor() as u32;
        let minutes = (minutes_in_day % 60.0).floor() as u32;
        Self::from_parts(day_offset as u32, hours, minutes)
    }

    pub fn from_parts(day_offset: u32, hours: u32, minutes: u32) -> Self {
        let (hour_angle, minute_angle) = hand_angles(hours, minutes);
        let time = format!("{}:{}", pad2(hours), pad2(minutes));
        let readout = if day_offset > 0 {
            format!("Day {}, {time}", day_offset.saturating_add(1))
        } else {
            time
        };
        Self {
            readout,
            hour_angle,
            minute_angle,
            hours,
            minutes,
            day_offset,
        }
    }

    pub fn is_beyond_expectancy(&self) -> bool {
        self.day_offset > 0
    }

    /// Rotation of the day/night dial: midnight points down, noon points up.
    pub fn day_night_angle(&self) -> f32 {
        let fraction = (self.hours as f32 + self.minutes as f32 / 60.0) / 24.0;
        fraction * 360.0 - 180.0
    }
}
