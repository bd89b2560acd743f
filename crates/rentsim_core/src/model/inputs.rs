//! Simulation inputs
//!
//! Everything a visitor can tune on the simulator form. Price and surface are
//! always clamped into their accepted ranges before they reach the financial
//! model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseOperatingModeError, ParseRoomTypeError};

pub const PRICE_MIN: f64 = 50_000.0;
pub const PRICE_MAX: f64 = 1_000_000.0;
pub const SURFACE_MIN: f64 = 10.0;
pub const SURFACE_MAX: f64 = 200.0;

/// Clamp a property price into `[PRICE_MIN, PRICE_MAX]`.
///
/// Non-finite values (NaN, infinities) land on the lower bound.
pub fn clamp_price(price: f64) -> f64 {
    clamp_finite(price, PRICE_MIN, PRICE_MAX)
}

/// Clamp a surface in m² into `[SURFACE_MIN, SURFACE_MAX]`.
pub fn clamp_surface(surface: f64) -> f64 {
    clamp_finite(surface, SURFACE_MIN, SURFACE_MAX)
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// Number of rooms of the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Studio,
    #[default]
    T2,
    T3,
    T4,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [RoomType::Studio, RoomType::T2, RoomType::T3, RoomType::T4];

    /// Multiplier applied to a base rent per m².
    ///
    /// Small units rent for more per m² than large ones; t2 is the reference.
    pub fn coefficient(self) -> f64 {
        match self {
            RoomType::Studio => 1.39,
            RoomType::T2 => 1.0,
            RoomType::T3 => 0.81,
            RoomType::T4 => 0.80,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Studio => "studio",
            RoomType::T2 => "t2",
            RoomType::T3 => "t3",
            RoomType::T4 => "t4",
        }
    }

    /// Lenient parse used at the HTTP boundary: anything unrecognised is a t2.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ParseRoomTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "studio" | "t1" => Ok(RoomType::Studio),
            "t2" => Ok(RoomType::T2),
            "t3" => Ok(RoomType::T3),
            "t4" => Ok(RoomType::T4),
            _ => Err(ParseRoomTypeError(s.to_string())),
        }
    }
}

/// How the property is rented out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatingMode {
    /// Traditional lease, revenue modelled monthly
    #[default]
    LongTerm,
    /// Nightly / vacation rental, revenue modelled from nightly rate × occupancy
    ShortTerm,
}

impl OperatingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatingMode::LongTerm => "longTerm",
            OperatingMode::ShortTerm => "shortTerm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperatingMode::LongTerm => "Long-term lease",
            OperatingMode::ShortTerm => "Short-term rental",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ParseOperatingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "longterm" | "long" => Ok(OperatingMode::LongTerm),
            "shortterm" | "short" => Ok(OperatingMode::ShortTerm),
            _ => Err(ParseOperatingModeError(s.to_string())),
        }
    }
}

/// A full set of simulator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInputs {
    pub price: f64,
    pub surface: f64,
    pub room_type: RoomType,
    pub operating_mode: OperatingMode,
    pub city: String,
}

impl SimulationInputs {
    /// Build inputs, clamping price and surface into range.
    pub fn new(
        price: f64,
        surface: f64,
        room_type: RoomType,
        operating_mode: OperatingMode,
        city: impl Into<String>,
    ) -> Self {
        Self {
            price: clamp_price(price),
            surface: clamp_surface(surface),
            room_type,
            operating_mode,
            city: city.into(),
        }
    }

    /// Copy of these inputs with price and surface clamped.
    pub fn clamped(&self) -> Self {
        Self {
            price: clamp_price(self.price),
            surface: clamp_surface(self.surface),
            ..self.clone()
        }
    }

    /// City with surrounding whitespace removed; `None` when nothing is left.
    pub fn trimmed_city(&self) -> Option<&str> {
        let city = self.city.trim();
        (!city.is_empty()).then_some(city)
    }
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            price: 200_000.0,
            surface: 50.0,
            room_type: RoomType::T2,
            operating_mode: OperatingMode::LongTerm,
            city: "Paris".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_price(10.0), PRICE_MIN);
        assert_eq!(clamp_price(5_000_000.0), PRICE_MAX);
        assert_eq!(clamp_price(123_456.0), 123_456.0);
        assert_eq!(clamp_surface(0.0), SURFACE_MIN);
        assert_eq!(clamp_surface(999.0), SURFACE_MAX);
        assert_eq!(clamp_price(f64::NAN), PRICE_MIN);
        assert_eq!(clamp_surface(f64::INFINITY), SURFACE_MIN);
    }

    #[test]
    fn test_new_clamps() {
        let inputs = SimulationInputs::new(1.0, 1_000.0, RoomType::T3, OperatingMode::ShortTerm, "x");
        assert_eq!(inputs.price, PRICE_MIN);
        assert_eq!(inputs.surface, SURFACE_MAX);
    }

    #[test]
    fn test_room_type_parse() {
        assert_eq!("Studio".parse::<RoomType>().unwrap(), RoomType::Studio);
        assert_eq!(" T4 ".parse::<RoomType>().unwrap(), RoomType::T4);
        assert!("t9".parse::<RoomType>().is_err());
        assert_eq!(RoomType::parse_or_default(Some("t9")), RoomType::T2);
        assert_eq!(RoomType::parse_or_default(None), RoomType::T2);
    }

    #[test]
    fn test_operating_mode_parse() {
        assert_eq!("longTerm".parse::<OperatingMode>().unwrap(), OperatingMode::LongTerm);
        assert_eq!("short-term".parse::<OperatingMode>().unwrap(), OperatingMode::ShortTerm);
        assert_eq!("short".parse::<OperatingMode>().unwrap(), OperatingMode::ShortTerm);
        assert!("weekly".parse::<OperatingMode>().is_err());
    }

    #[test]
    fn test_trimmed_city() {
        let mut inputs = SimulationInputs::default();
        assert_eq!(inputs.trimmed_city(), Some("Paris"));
        inputs.city = "   ".to_string();
        assert_eq!(inputs.trimmed_city(), None);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(SimulationInputs::default()).unwrap();
        assert_eq!(json["roomType"], "t2");
        assert_eq!(json["operatingMode"], "longTerm");
    }
}
