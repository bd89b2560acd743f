//! Market data feeding the financial model
//!
//! Mirrors what a client does with a live answer: rent per m² times surface
//! for long-term, the monthly estimate as-is for short-term.

use crate::evaluate::evaluate;
use crate::market_data::{long_term_rate, short_term_rate};
use crate::model::{DataSource, Freshness, OperatingMode, RoomType};

#[test]
fn test_long_term_live_revenue() {
    let rate = long_term_rate("Montreuil", RoomType::T3);
    let revenue = rate.rent_per_sqm * 45.0;
    let r = evaluate(
        300_000.0,
        45.0,
        OperatingMode::LongTerm,
        RoomType::T3,
        Some(revenue),
        DataSource::LongTerm(rate.freshness),
    );

    // 24 €/m² × 0.81 × 45 m²
    assert!((r.monthly_revenue - 874.8).abs() < 1e-9);
    assert_eq!(r.monthly_rent_per_sqm, None);
    assert_eq!(r.data_source, DataSource::LongTerm(Freshness::Live));
}

#[test]
fn test_coefficient_not_applied_twice_on_live_path() {
    let studio = long_term_rate("paris", RoomType::Studio);
    let r = evaluate(
        200_000.0,
        20.0,
        OperatingMode::LongTerm,
        RoomType::Studio,
        Some(studio.rent_per_sqm * 20.0),
        DataSource::LongTerm(studio.freshness),
    );

    assert!((r.monthly_revenue - 32.0 * 1.39 * 20.0).abs() < 1e-9);
}

#[test]
fn test_short_term_unknown_city_uses_paris() {
    let rate = short_term_rate("Trappes");
    let r = evaluate(
        180_000.0,
        30.0,
        OperatingMode::ShortTerm,
        RoomType::Studio,
        Some(rate.monthly_revenue_estimate),
        DataSource::ShortTerm(rate.freshness),
    );

    assert!((r.monthly_revenue - 2_700.0).abs() < 1e-9);
    assert_eq!(r.data_source.tag(), "airdna|fallback");
}
