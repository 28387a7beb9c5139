//! Metro fare calculator.
//!
//! Prices a single trip on a linear line by composing independent rules:
//! a distance-tiered base fare, an optional VIP discount and an optional
//! flat surcharge, applied in that order.

pub mod cli;
pub mod config;
pub mod domain;
pub mod fare;
pub mod network;
pub mod planner;

#[cfg(test)]
mod test_support;
