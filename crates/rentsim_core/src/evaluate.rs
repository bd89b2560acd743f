//! Financial model
//!
//! Maps a property (price, surface, room type, operating mode) plus an
//! optional externally supplied monthly revenue to a complete
//! [`SimulationResult`]. Pure and deterministic: the same inputs always give
//! the same figures, and nothing here can fail for in-range inputs.

use crate::model::{DataSource, OperatingMode, RoomType, SimulationInputs, SimulationResult};

/// Notary fees, as a share of the price
pub const NOTARY_RATE: f64 = 0.09;
/// Agency commission, as a share of the price
pub const AGENCY_RATE: f64 = 0.085;
/// Architect fees per m² for a long-term refit
pub const ARCHITECT_PER_SQM_LONG_TERM: f64 = 90.0;
/// Architect fees per m² for a short-term (furnished) refit
pub const ARCHITECT_PER_SQM_SHORT_TERM: f64 = 120.0;

/// Base monthly rent per m² used when no market figure is available
pub const BASE_RENT_PER_SQM: f64 = 12.0;
/// Empirical nights-equivalent multiplier for short-term rentals
pub const SHORT_TERM_NIGHTS_FACTOR: f64 = 3.0;
/// Empirical occupancy assumed for short-term rentals
pub const SHORT_TERM_OCCUPANCY: f64 = 0.7;

pub fn architect_rate(mode: OperatingMode) -> f64 {
    match mode {
        OperatingMode::LongTerm => ARCHITECT_PER_SQM_LONG_TERM,
        OperatingMode::ShortTerm => ARCHITECT_PER_SQM_SHORT_TERM,
    }
}

/// Locally estimated monthly rent per m², used when no revenue is supplied.
pub fn fallback_rent_per_sqm(mode: OperatingMode, room_type: RoomType) -> f64 {
    let base = BASE_RENT_PER_SQM * room_type.coefficient();
    match mode {
        OperatingMode::LongTerm => base,
        OperatingMode::ShortTerm => base * SHORT_TERM_NIGHTS_FACTOR * SHORT_TERM_OCCUPANCY,
    }
}

/// Evaluate a property.
///
/// `supplied_monthly_revenue` is the "live data" path: when present it is used
/// verbatim and `monthly_rent_per_sqm` stays `None`. Otherwise revenue is the
/// local fallback estimate and the per-m² figure is reported.
///
/// Price and surface are expected to be clamped already (see
/// [`SimulationInputs::clamped`]); no validation happens here.
pub fn evaluate(
    price: f64,
    surface: f64,
    mode: OperatingMode,
    room_type: RoomType,
    supplied_monthly_revenue: Option<f64>,
    data_source: DataSource,
) -> SimulationResult {
    let notary_fees = price * NOTARY_RATE;
    let agency_commission = price * AGENCY_RATE;
    let architect_fees = surface * architect_rate(mode);

    let total_fees = notary_fees + agency_commission + architect_fees;
    let total_investment = price + total_fees;

    let (monthly_revenue, monthly_rent_per_sqm) = match supplied_monthly_revenue {
        Some(revenue) => (revenue, None),
        None => {
            let rent_per_sqm = fallback_rent_per_sqm(mode, room_type);
            (rent_per_sqm * surface, Some(rent_per_sqm))
        }
    };

    let annual_revenue = monthly_revenue * 12.0;
    let gross_yield_percent = annual_revenue / total_investment * 100.0;
    let monthly_cash_flow = monthly_revenue - total_fees / 12.0;

    SimulationResult {
        gross_yield_percent,
        monthly_cash_flow,
        total_fees,
        notary_fees,
        agency_commission,
        architect_fees,
        total_investment,
        monthly_revenue,
        annual_revenue,
        monthly_rent_per_sqm,
        data_source,
    }
}

/// Clamp `inputs` and evaluate them.
pub fn evaluate_inputs(
    inputs: &SimulationInputs,
    supplied_monthly_revenue: Option<f64>,
    data_source: DataSource,
) -> SimulationResult {
    let inputs = inputs.clamped();
    evaluate(
        inputs.price,
        inputs.surface,
        inputs.operating_mode,
        inputs.room_type,
        supplied_monthly_revenue,
        data_source,
    )
}
