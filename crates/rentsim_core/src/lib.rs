//! Rental profitability simulation library
//!
//! This crate holds the logic-bearing part of the simulator:
//! - The financial model: acquisition costs, revenue, gross yield and cash flow
//! - Per-city market data tables (long-term rent, short-term nightly rate)
//!   with default-city fallback
//! - Accent-insensitive city suggestions over a fixed gazetteer
//! - The wire types exchanged with the market-data service
//!
//! ```
//! use rentsim_core::evaluate::evaluate;
//! use rentsim_core::model::{DataSource, OperatingMode, RoomType};
//!
//! let result = evaluate(
//!     100_000.0,
//!     50.0,
//!     OperatingMode::LongTerm,
//!     RoomType::T2,
//!     None,
//!     DataSource::Local,
//! );
//! assert_eq!(result.total_investment, 122_000.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cities;
pub mod error;
pub mod evaluate;
pub mod market_data;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cities::suggest;
pub use evaluate::{evaluate, evaluate_inputs};
pub use market_data::{long_term_rate, short_term_rate};
pub use model::{DataSource, OperatingMode, RoomType, SimulationInputs, SimulationResult};
