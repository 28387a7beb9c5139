//! Fare rules and the evaluators that apply them.
//!
//! A fare is built up in stages. Each stage pairs one [`FareRule`] with the
//! [`FareStrategy`] for its kind and turns the fare so far into a new one.

mod context;
mod rules;
mod strategy;

pub use context::apply;
pub use rules::{
    FareRule, OTHER_RULE_ID, OtherFareRule, RuleKind, STATION_RULE_ID, StationFareRule,
    VIP_RULE_ID, VipFareRule,
};
pub use strategy::{
    DistanceTierStrategy, FareStrategy, SurchargeStrategy, TierSchedule, VipDiscountStrategy,
};
