//! Value converters
//!
//! Pure functions translating raw host units into document-ready values, plus
//! the [`Converter`] tag the registry stores per mapping. A converter that
//! returns `None` rejects the update: nothing is written for that raw value.

use crate::types::{GameTime, Placement, Transform, Value};
use chrono::{Duration, NaiveDate};

/// Start of the game clock: year 1, January 1, midnight
pub fn game_time_base() -> GameTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Serialize a game-clock instant as a second-precision, UTC-suffixed ISO-8601 string
pub fn json_time(time: GameTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Absolute instant `minutes` after the start of the game clock
pub fn minutes_from_base(minutes: i64) -> Option<GameTime> {
    game_time_base().checked_add_signed(Duration::try_minutes(minutes)?)
}

/// Absolute instant `seconds` after the start of the game clock
pub fn seconds_from_base(seconds: f64) -> Option<GameTime> {
    if !seconds.is_finite() {
        return None;
    }
    game_time_base().checked_add_signed(Duration::try_seconds(seconds.round() as i64)?)
}

/// Time left until `deadline`, expressed as an instant on the game clock
///
/// A passed deadline yields the clock base (zero remaining).
pub fn remaining_time(now: GameTime, deadline: GameTime) -> GameTime {
    if now > deadline {
        game_time_base()
    } else {
        game_time_base() + (deadline - now)
    }
}

pub fn mps_to_kph(mps: f64) -> i64 {
    (3.6 * mps).round() as i64
}

pub fn non_zero(value: f64) -> bool {
    value != 0.0
}

/// Wheel lift offset to "lifted" state
pub fn is_lifted(value: f64) -> bool {
    value > 0.0
}

/// Merge a position and an orientation into one flat placement
///
/// The host can report infinite or NaN components, which the document's
/// serialization format cannot carry; such placements are rejected.
pub fn flatten_placement(transform: &Transform) -> Option<Placement> {
    let placement = Placement {
        x: transform.position.x,
        y: transform.position.y,
        z: transform.position.z,
        heading: transform.orientation.heading,
        pitch: transform.orientation.pitch,
        roll: transform.orientation.roll,
    };

    if placement.components().iter().all(|v| v.is_finite()) {
        Some(placement)
    } else {
        None
    }
}

pub fn bit_is_set(mask: u32, bit: usize) -> bool {
    bit < 32 && mask & (1 << bit) != 0
}

/// `mask` with bit `bit` set or cleared; out-of-range bits leave it unchanged
pub fn with_bit(mask: u32, bit: usize, on: bool) -> u32 {
    if bit >= 32 {
        return mask;
    }
    if on {
        mask | (1 << bit)
    } else {
        mask & !(1 << bit)
    }
}

/// Conversion applied to a raw value before it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// m/s to rounded km/h
    MpsToKph,
    NonZero,
    /// Positive offset means lifted
    Lifted,
    Round,
    FlattenPlacement,
    /// Minutes since the start of the game clock
    Minutes,
    /// Seconds since the start of the game clock
    Seconds,
    /// Ignore the raw value and write the cached game time
    CurrentGameTime,
}

impl Converter {
    /// Apply the conversion; `None` rejects the update
    pub fn apply(self, value: Value, game_time: GameTime) -> Option<Value> {
        match self {
            Converter::MpsToKph => finite(&value).map(|v| Value::Integer(mps_to_kph(v))),
            Converter::NonZero => value.as_f64().map(|v| Value::Bool(non_zero(v))),
            Converter::Lifted => value.as_f64().map(|v| Value::Bool(is_lifted(v))),
            Converter::Round => finite(&value).map(|v| Value::Integer(v.round() as i64)),
            Converter::FlattenPlacement => match value {
                Value::Transform(transform) => flatten_placement(&transform).map(Value::Placement),
                Value::Placement(placement) if placement.components().iter().all(|v| v.is_finite()) => {
                    Some(Value::Placement(placement))
                }
                _ => None,
            },
            Converter::Minutes => value.as_i64().and_then(minutes_from_base).map(Value::Time),
            Converter::Seconds => value.as_f64().and_then(seconds_from_base).map(Value::Time),
            Converter::CurrentGameTime => Some(Value::Time(game_time)),
        }
    }
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
