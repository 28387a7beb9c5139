//! Human-readable output.

use std::fmt::Write;

use crate::network::Line;
use crate::planner::FareQuote;

const RULE: &str = "-----------------------";

/// Base fare line.
pub fn base_message(quote: &FareQuote) -> String {
    format!(
        "From {} to {}, distance {} km, fare: {:.2}",
        quote.from, quote.to, quote.distance, quote.base_fare
    )
}

/// VIP line, if the discount was applied.
pub fn vip_message(quote: &FareQuote) -> Option<String> {
    let (discount, fare) = (quote.vip_discount?, quote.vip_fare?);
    Some(format!(
        "VIP discount of {}% applied, fare: {:.2}",
        (discount * 1000.0).round() / 10.0,
        fare
    ))
}

/// Surcharge line, if one was added.
pub fn surcharge_message(quote: &FareQuote) -> Option<String> {
    let surcharge = quote.surcharge.as_ref()?;
    Some(format!(
        "Additional fee \"{}\": {:+.2}",
        surcharge.name, surcharge.amount
    ))
}

/// Final fare line.
pub fn total_message(quote: &FareQuote) -> String {
    format!(
        "From {} to {}, total fare: {:.2}",
        quote.from, quote.to, quote.total_fare
    )
}

/// Every applied stage, one per line.
pub fn render_quote(quote: &FareQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", base_message(quote));
    if let Some(line) = vip_message(quote) {
        let _ = writeln!(out, "{line}");
    }
    if let Some(line) = surcharge_message(quote) {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", total_message(quote));
    out
}

/// Station table, in travel order.
pub fn station_list(line: &Line) -> String {
    let mut out = String::new();
    for (i, stop) in line.stops().enumerate() {
        let _ = writeln!(out, "{:>3}  {:<12} {:>6.1} km", i + 1, stop.name, stop.distance);
    }
    out
}

pub(crate) fn separator() -> &'static str {
    RULE
}
