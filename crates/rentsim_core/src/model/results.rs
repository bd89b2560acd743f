//! Simulation results
//!
//! A `SimulationResult` is always produced whole by the financial model; no
//! field is ever patched after the fact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseDataSourceError;

/// Whether a market figure came from the requested city or the default city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Live,
    Fallback,
}

impl Freshness {
    pub fn as_str(self) -> &'static str {
        match self {
            Freshness::Live => "live",
            Freshness::Fallback => "fallback",
        }
    }

    /// Interpret a provider-reported `source` string.
    ///
    /// A missing source, or one that does not mention a fallback, counts as live.
    pub fn from_reported(source: Option<&str>) -> Self {
        match source {
            Some(s) if s.to_lowercase().contains("fallback") => Freshness::Fallback,
            _ => Freshness::Live,
        }
    }
}

/// Where the revenue figure of a result came from
///
/// Serialized as the tag strings used throughout the UI and the report:
/// `local`, `meilleursagents|live`, `airdna|fallback`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Built-in fallback estimate of the financial model
    Local,
    /// Long-term rent table (`rent-data`)
    LongTerm(Freshness),
    /// Short-term nightly-rate table (`airbnb-data`)
    ShortTerm(Freshness),
}

const LONG_TERM_PROVIDER: &str = "meilleursagents";
const SHORT_TERM_PROVIDER: &str = "airdna";

impl DataSource {
    pub fn tag(self) -> String {
        match self {
            DataSource::Local => "local".to_string(),
            DataSource::LongTerm(f) => format!("{LONG_TERM_PROVIDER}|{}", f.as_str()),
            DataSource::ShortTerm(f) => format!("{SHORT_TERM_PROVIDER}|{}", f.as_str()),
        }
    }

    /// Human readable badge for the results panel
    pub fn label(self) -> &'static str {
        match self {
            DataSource::Local => "Fallback local",
            DataSource::LongTerm(Freshness::Live) => "MeilleursAgents (live)",
            DataSource::LongTerm(Freshness::Fallback) => "MeilleursAgents (default city)",
            DataSource::ShortTerm(Freshness::Live) => "AirDNA (live)",
            DataSource::ShortTerm(Freshness::Fallback) => "AirDNA (default city)",
        }
    }

    pub fn is_live(self) -> bool {
        matches!(
            self,
            DataSource::LongTerm(Freshness::Live) | DataSource::ShortTerm(Freshness::Live)
        )
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for DataSource {
    type Err = ParseDataSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "local" {
            return Ok(DataSource::Local);
        }
        let (provider, freshness) = lower
            .split_once('|')
            .ok_or_else(|| ParseDataSourceError(s.to_string()))?;
        let freshness = match freshness {
            "live" => Freshness::Live,
            "fallback" => Freshness::Fallback,
            _ => return Err(ParseDataSourceError(s.to_string())),
        };
        match provider {
            LONG_TERM_PROVIDER => Ok(DataSource::LongTerm(freshness)),
            SHORT_TERM_PROVIDER => Ok(DataSource::ShortTerm(freshness)),
            _ => Err(ParseDataSourceError(s.to_string())),
        }
    }
}

impl Serialize for DataSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for DataSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Full output of one financial evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Annual revenue over total investment, in percent
    pub gross_yield_percent: f64,
    /// Monthly revenue minus one twelfth of the acquisition fees
    pub monthly_cash_flow: f64,
    pub total_fees: f64,
    pub notary_fees: f64,
    pub agency_commission: f64,
    pub architect_fees: f64,
    /// Price plus every acquisition fee
    pub total_investment: f64,
    pub monthly_revenue: f64,
    pub annual_revenue: f64,
    /// Only set when the revenue was estimated locally from a per-m² rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent_per_sqm: Option<f64>,
    pub data_source: DataSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_back() {
        for source in [
            DataSource::Local,
            DataSource::LongTerm(Freshness::Live),
            DataSource::LongTerm(Freshness::Fallback),
            DataSource::ShortTerm(Freshness::Live),
            DataSource::ShortTerm(Freshness::Fallback),
        ] {
            assert_eq!(source.tag().parse::<DataSource>().unwrap(), source);
        }
        assert!("bogus|live".parse::<DataSource>().is_err());
        assert!("airdna".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_reported_freshness() {
        assert_eq!(Freshness::from_reported(None), Freshness::Live);
        assert_eq!(Freshness::from_reported(Some("meilleursagents")), Freshness::Live);
        assert_eq!(
            Freshness::from_reported(Some("airdna|Fallback")),
            Freshness::Fallback
        );
    }

    #[test]
    fn test_only_provider_sources_are_live() {
        assert!(!DataSource::Local.is_live());
        assert!(DataSource::ShortTerm(Freshness::Live).is_live());
        assert!(!DataSource::LongTerm(Freshness::Fallback).is_live());
    }
}
