//! Market data lookups
//!
//! Two independent, read-only tables: long-term rent per m² by city and
//! short-term nightly rate / occupancy by city. Both are keyed by a
//! normalised city identifier and never fail: a miss substitutes the record
//! of [`DEFAULT_CITY`].

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::cities::normalize;
use crate::model::{AirbnbData, DataSource, Freshness, RentData, RoomType};

/// City whose records stand in for any unknown city
pub const DEFAULT_CITY: &str = "paris";

/// Nights per month used to turn a nightly rate into a monthly revenue
pub const NIGHTS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongTermRecord {
    pub price_per_sqm: f64,
    /// Reference rent per m² per month for a t2
    pub rent_per_sqm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortTermRecord {
    pub nightly_rate: f64,
    pub occupancy_rate: f64,
}

const fn lt(price_per_sqm: f64, rent_per_sqm: f64) -> LongTermRecord {
    LongTermRecord {
        price_per_sqm,
        rent_per_sqm,
    }
}

const fn st(nightly_rate: f64, occupancy_rate: f64) -> ShortTermRecord {
    ShortTermRecord {
        nightly_rate,
        occupancy_rate,
    }
}

const LONG_TERM_TABLE: &[(&str, LongTermRecord)] = &[
    ("paris", lt(10_500.0, 32.0)),
    ("boulogne", lt(8_200.0, 27.0)),
    ("issy", lt(7_800.0, 26.0)),
    ("montreuil", lt(7_200.0, 24.0)),
    ("vincennes", lt(8_500.0, 28.0)),
    ("arcueil", lt(6_000.0, 22.0)),
    ("creteil", lt(5_000.0, 20.0)),
    ("nanterre", lt(6_200.0, 23.0)),
    ("courbevoie", lt(7_300.0, 25.0)),
    ("puteaux", lt(7_400.0, 25.0)),
    ("clichy", lt(6_500.0, 24.0)),
    ("levallois", lt(8_800.0, 29.0)),
    ("neuilly", lt(11_500.0, 33.0)),
    ("saintdenis", lt(4_800.0, 18.0)),
    ("aubervilliers", lt(4_600.0, 17.0)),
    ("pantin", lt(5_600.0, 21.0)),
];

const SHORT_TERM_TABLE: &[(&str, ShortTermRecord)] = &[
    ("paris", st(120.0, 0.75)),
    ("boulogne", st(90.0, 0.68)),
    ("issy", st(85.0, 0.65)),
    ("montreuil", st(70.0, 0.60)),
    ("vincennes", st(100.0, 0.72)),
    ("arcueil", st(65.0, 0.55)),
];

static LONG_TERM: LazyLock<FxHashMap<&'static str, LongTermRecord>> =
    LazyLock::new(|| LONG_TERM_TABLE.iter().copied().collect());

static SHORT_TERM: LazyLock<FxHashMap<&'static str, ShortTermRecord>> =
    LazyLock::new(|| SHORT_TERM_TABLE.iter().copied().collect());

/// Normalise a free-text city into a table key.
///
/// Lower-cases, strips accents and drops anything that is not a letter or a
/// digit, so "Saint-Denis" and "saint denis" both become `saintdenis`.
pub fn city_key(city: &str) -> String {
    normalize(city.trim())
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Long-term figures for a city, adjusted for the room type
#[derive(Debug, Clone, PartialEq)]
pub struct LongTermRate {
    pub city_key: String,
    pub price_per_sqm: f64,
    pub rent_per_sqm: f64,
    pub freshness: Freshness,
}

/// Short-term figures for a city
#[derive(Debug, Clone, PartialEq)]
pub struct ShortTermRate {
    pub city_key: String,
    pub nightly_rate: f64,
    pub occupancy_rate: f64,
    pub monthly_revenue_estimate: f64,
    pub freshness: Freshness,
}

fn lookup<R: Copy>(table: &FxHashMap<&'static str, R>, key: &str) -> (R, Freshness) {
    match table.get(key) {
        Some(record) => (*record, Freshness::Live),
        None => (table[DEFAULT_CITY], Freshness::Fallback),
    }
}

/// Look up the long-term rent of `city` and apply the room-type coefficient.
pub fn long_term_rate(city: &str, room_type: RoomType) -> LongTermRate {
    let key = city_key(city);
    let (record, freshness) = lookup(&LONG_TERM, &key);
    LongTermRate {
        city_key: key,
        price_per_sqm: record.price_per_sqm,
        rent_per_sqm: record.rent_per_sqm * room_type.coefficient(),
        freshness,
    }
}

/// Look up the short-term figures of `city`.
pub fn short_term_rate(city: &str) -> ShortTermRate {
    let key = city_key(city);
    let (record, freshness) = lookup(&SHORT_TERM, &key);
    ShortTermRate {
        city_key: key,
        nightly_rate: record.nightly_rate,
        occupancy_rate: record.occupancy_rate,
        monthly_revenue_estimate: record.nightly_rate * record.occupancy_rate * NIGHTS_PER_MONTH,
        freshness,
    }
}

/// Cities with a long-term record, in declaration order
pub fn long_term_cities() -> impl Iterator<Item = &'static str> {
    LONG_TERM_TABLE.iter().map(|(key, _)| *key)
}

/// Cities with a short-term record, in declaration order
pub fn short_term_cities() -> impl Iterator<Item = &'static str> {
    SHORT_TERM_TABLE.iter().map(|(key, _)| *key)
}

impl LongTermRate {
    /// Wire form, tagging the source with the lookup freshness
    pub fn to_wire(&self) -> RentData {
        RentData {
            city: self.city_key.clone(),
            price_per_sqm: self.price_per_sqm,
            rent_per_sqm: self.rent_per_sqm,
            source: Some(DataSource::LongTerm(self.freshness).tag()),
        }
    }
}

impl ShortTermRate {
    pub fn to_wire(&self) -> AirbnbData {
        AirbnbData {
            city: self.city_key.clone(),
            nightly_rate: self.nightly_rate,
            occupancy_rate: self.occupancy_rate,
            monthly_revenue_estimate: self.monthly_revenue_estimate,
            source: Some(DataSource::ShortTerm(self.freshness).tag()),
        }
    }
}
