//! Rental profitability simulator client
//!
//! Drives [`rentsim_core`] from the terminal:
//! - A debounced simulation orchestrator fed by market data from the
//!   rentsim service, or from the built-in tables when offline
//! - Plain-text results panel and city suggestions
//! - Paginated report export

#![warn(clippy::all)]

// ============================================================================
// Simulation flow
// ============================================================================

pub mod abort;
pub mod debounce;
pub mod orchestrator;
pub mod source;

// ============================================================================
// Front end
// ============================================================================

pub mod app;
pub mod display;
pub mod report;
pub mod watch;

// ============================================================================
// Support
// ============================================================================

pub mod config;
pub mod logging;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use app::{App, ExportTarget};
pub use config::ClientConfig;
pub use logging::init_logging;
pub use orchestrator::{SimulationHandle, SimulationPhase, SimulationView};
pub use report::{ReportExporter, TextReportExporter};
pub use source::{HttpMarketData, LocalMarketData, MarketDataSource};
