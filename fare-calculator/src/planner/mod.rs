//! Fare quoting.
//!
//! Turns a passenger's request into a staged fare: base fare from the line
//! distance, then the optional VIP discount, then the optional surcharge.

mod quote;

pub use quote::{FarePlanner, FareQuote, QuoteRequest, QuoteStage, Surcharge};
