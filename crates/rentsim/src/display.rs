//! Plain-text rendering of the simulation view and city suggestions

use std::fmt::Write;

use rentsim_core::cities::match_span;
use rentsim_core::model::{SimulationInputs, SimulationResult};

use crate::orchestrator::{SimulationPhase, SimulationView};
use crate::util::format::{
    format_euros, format_euros_cents, format_per_sqm, format_percent, format_surface,
};

const LABEL_WIDTH: usize = 22;

fn describe_inputs(inputs: &SimulationInputs) -> String {
    format!(
        "{} · {} · {} · {} · {}",
        inputs.city.trim(),
        format_euros(inputs.price),
        format_surface(inputs.surface),
        inputs.room_type,
        inputs.operating_mode.label()
    )
}

fn render_result(out: &mut String, result: &SimulationResult) {
    let rows = [
        ("Gross yield", format_percent(result.gross_yield_percent)),
        ("Monthly cash flow", format_euros_cents(result.monthly_cash_flow)),
        ("Monthly revenue", format_euros_cents(result.monthly_revenue)),
        ("Annual revenue", format_euros(result.annual_revenue)),
        ("Notary fees", format_euros(result.notary_fees)),
        ("Agency commission", format_euros(result.agency_commission)),
        ("Architect fees", format_euros(result.architect_fees)),
        ("Total fees", format_euros(result.total_fees)),
        ("Total investment", format_euros(result.total_investment)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{value}");
    }
    if let Some(rent) = result.monthly_rent_per_sqm {
        let _ = writeln!(out, "  {:<LABEL_WIDTH$}{}", "Rent per m²", format_per_sqm(rent));
    }

    let badge = if result.data_source.is_live() {
        format!("[{}]", result.data_source.label())
    } else {
        format!("({})", result.data_source.label())
    };
    let _ = writeln!(out, "  {:<LABEL_WIDTH$}{badge}", "Source");
}

/// Render the results panel for `view`.
pub fn render_view(view: &SimulationView) -> String {
    let mut out = String::new();

    match view.phase {
        SimulationPhase::Idle => {
            out.push_str("Enter a city to start the simulation.\n");
            return out;
        }
        SimulationPhase::Pending => {
            let city = view
                .inputs
                .as_ref()
                .map(|i| i.city.trim())
                .unwrap_or_default();
            let _ = writeln!(out, "Fetching market data for {city}...");
            return out;
        }
        SimulationPhase::Settled | SimulationPhase::Error => {}
    }

    if let Some(inputs) = &view.inputs {
        let _ = writeln!(out, "{}", describe_inputs(inputs));
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(result) = &view.result {
        render_result(&mut out, result);
    }
    out
}

/// Wrap the part of `city` matching `query` in brackets.
pub fn highlight(city: &str, query: &str) -> String {
    match match_span(city, query) {
        Some(span) => format!(
            "{}[{}]{}",
            &city[..span.start],
            &city[span.clone()],
            &city[span.end..]
        ),
        None => city.to_string(),
    }
}

/// One suggestion per line, with the matched part highlighted.
pub fn render_suggestions(query: &str, suggestions: &[&str]) -> String {
    if suggestions.is_empty() {
        return format!("No known city matches \"{}\".\n", query.trim());
    }
    suggestions
        .iter()
        .map(|city| format!("{}\n", highlight(city, query)))
        .collect()
}
