//! Simulation report export
//!
//! The report reproduces the inputs and every figure of a
//! [`SimulationResult`] as computed; nothing is recalculated here.

use std::path::PathBuf;

use jiff::Zoned;
use rentsim_core::model::{SimulationInputs, SimulationResult};

use crate::orchestrator::SimulationView;
use crate::util::format::{
    format_euros, format_euros_cents, format_per_sqm, format_percent, format_surface,
};
use crate::util::io::atomic_write;

/// Lines of content per page, header and footer excluded
pub const PAGE_BODY_LINES: usize = 22;

const PAGE_WIDTH: usize = 72;
const TITLE: &str = "RENTSIM - Rental profitability simulation";
const FORM_FEED: char = '\u{000C}';

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no simulation result to export yet")]
    Unavailable,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ReportExporter {
    /// Render and store a report, returning where it was written.
    fn export(
        &self,
        inputs: &SimulationInputs,
        result: &SimulationResult,
    ) -> Result<PathBuf, ReportError>;

    /// Export the current view; only possible once it carries a result.
    fn export_view(&self, view: &SimulationView) -> Result<PathBuf, ReportError> {
        match (&view.inputs, &view.result) {
            (Some(inputs), Some(result)) => self.export(inputs, result),
            _ => Err(ReportError::Unavailable),
        }
    }
}

#[derive(Debug, Clone)]
enum Target {
    Directory(PathBuf),
    File(PathBuf),
}

/// Writes the report as paginated plain text
#[derive(Debug, Clone)]
pub struct TextReportExporter {
    target: Target,
}

impl TextReportExporter {
    /// Write timestamped report files into `dir`.
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Directory(dir.into()),
        }
    }

    /// Always write to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
        }
    }

    fn destination(&self, generated_at: &Zoned) -> PathBuf {
        match &self.target {
            Target::File(path) => path.clone(),
            Target::Directory(dir) => dir.join(format!(
                "rentsim-report-{}.txt",
                generated_at.strftime("%Y%m%d-%H%M%S")
            )),
        }
    }
}

impl ReportExporter for TextReportExporter {
    fn export(
        &self,
        inputs: &SimulationInputs,
        result: &SimulationResult,
    ) -> Result<PathBuf, ReportError> {
        let generated_at = Zoned::now();
        let path = self.destination(&generated_at);
        let stamp = generated_at.strftime("%d/%m/%Y %H:%M").to_string();

        atomic_write(&path, &render(inputs, result, &stamp))?;
        tracing::info!(path = %path.display(), "Report exported");
        Ok(path)
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn row(label: &str, value: &str) -> String {
    let width = PAGE_WIDTH.saturating_sub(label.chars().count() + 2);
    format!("  {label}{value:>width$}")
}

fn section(title: &str) -> [String; 2] {
    [title.to_uppercase(), "-".repeat(title.chars().count())]
}

fn body_lines(inputs: &SimulationInputs, result: &SimulationResult) -> Vec<String> {
    let mut lines = Vec::new();

    lines.extend(section("Property"));
    lines.push(row("City", inputs.city.trim()));
    lines.push(row("Purchase price", &format_euros(inputs.price)));
    lines.push(row("Surface", &format_surface(inputs.surface)));
    lines.push(row("Rooms", inputs.room_type.as_str()));
    lines.push(row("Operating mode", inputs.operating_mode.label()));
    lines.push(String::new());

    lines.extend(section("Acquisition costs"));
    lines.push(row("Notary fees", &format_euros(result.notary_fees)));
    lines.push(row("Agency commission", &format_euros(result.agency_commission)));
    lines.push(row("Architect fees", &format_euros(result.architect_fees)));
    lines.push(row("Total fees", &format_euros(result.total_fees)));
    lines.push(row("Total investment", &format_euros(result.total_investment)));
    lines.push(String::new());

    lines.extend(section("Rental income"));
    lines.push(row("Monthly revenue", &format_euros_cents(result.monthly_revenue)));
    lines.push(row("Annual revenue", &format_euros(result.annual_revenue)));
    if let Some(rent) = result.monthly_rent_per_sqm {
        lines.push(row("Rent per m² (monthly)", &format_per_sqm(rent)));
    }
    lines.push(row("Data source", result.data_source.label()));
    lines.push(String::new());

    lines.extend(section("Profitability"));
    lines.push(row("Gross yield", &format_percent(result.gross_yield_percent)));
    lines.push(row(
        "Monthly cash flow",
        &format_euros_cents(result.monthly_cash_flow),
    ));
    lines.push(String::new());

    lines.extend(section("Notes"));
    for note in [
        "Acquisition costs include notary fees (9 % of the price), the agency",
        "commission (8.5 %) and architect fees per square metre (90 € for a",
        "long-term lease, 120 € for a short-term rental).",
        "",
        "Gross yield is annual revenue over total investment, before charges,",
        "property tax, vacancy and financing. Cash flow spreads the acquisition",
        "fees over twelve months.",
        "",
        "Market figures are indicative. This simulation is not investment advice.",
    ] {
        lines.push(format!("  {note}").trim_end().to_string());
    }

    lines
}

fn page_header(page: usize, pages: usize) -> [String; 2] {
    let counter = format!("Page {page}/{pages}");
    let width = PAGE_WIDTH.saturating_sub(TITLE.chars().count());
    [format!("{TITLE}{counter:>width$}"), "=".repeat(PAGE_WIDTH)]
}

fn page_footer(generated_at: &str) -> [String; 2] {
    let left = "Confidential";
    let right = format!("Generated {generated_at}");
    let width = PAGE_WIDTH.saturating_sub(left.len());
    ["=".repeat(PAGE_WIDTH), format!("{left}{right:>width$}")]
}

/// Render the report text.
///
/// Pages hold [`PAGE_BODY_LINES`] lines of content between a header and a
/// footer, and are separated by a form feed.
pub fn render(inputs: &SimulationInputs, result: &SimulationResult, generated_at: &str) -> String {
    let body = body_lines(inputs, result);
    let chunks: Vec<&[String]> = body.chunks(PAGE_BODY_LINES).collect();
    let pages = chunks.len().max(1);

    let mut out = String::new();
    for (index, chunk) in chunks.iter().enumerate() {
        if index > 0 {
            out.push(FORM_FEED);
        }
        let mut page: Vec<String> = Vec::with_capacity(PAGE_BODY_LINES + 5);
        page.extend(page_header(index + 1, pages));
        page.push(String::new());
        page.extend(chunk.iter().cloned());
        page.resize(PAGE_BODY_LINES + 3, String::new());
        page.extend(page_footer(generated_at));

        for line in page {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
