use std::fmt;

use super::SensorError;

/// The latest distance, the only piece of state that gets published
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Whole number, as produced by the simulator
    Whole(u32),
    /// Centimetres measured by the sensor, built through [Reading::centimeters]
    Centimeters(Centimeters),
}

/// Non-negative, finite distance rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centimeters(f64);

impl Centimeters {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Reading {
    /// Builds a Centimeters reading rounded to two decimals. Negative, NaN and infinite
    /// values are rejected.
    pub fn centimeters(value: f64) -> Result<Reading, SensorError> {
        if !value.is_finite() || value < 0.0 {
            return Err(SensorError::InvalidReading(value));
        }
        Ok(Reading::Centimeters(Centimeters(round_to_hundredths(value))))
    }

    pub fn value(&self) -> f64 {
        match *self {
            Reading::Whole(value) => f64::from(value),
            Reading::Centimeters(value) => value.get(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Whole(value) => write!(f, "{value}"),
            Reading::Centimeters(value) => write!(f, "{}", value.get()),
        }
    }
}

/// Rounds to two decimals, sending exact halves to the even hundredth
pub fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let rounded = match (scaled - floor).partial_cmp(&0.5) {
        Some(std::cmp::Ordering::Less) => floor,
        Some(std::cmp::Ordering::Greater) => floor + 1.0,
        _ if floor % 2.0 == 0.0 => floor,
        _ => floor + 1.0,
    };
    rounded / 100.0
}
