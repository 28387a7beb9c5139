//! Binding one evaluator to one rule application.

use tracing::trace;

use super::rules::FareRule;
use super::strategy::{
    DistanceTierStrategy, FareStrategy, SurchargeStrategy, TierSchedule, VipDiscountStrategy,
};

/// Apply `strategy` to `rule`, starting from `current_fare`.
///
/// If `rule` is not the variant the strategy understands, the strategy's
/// fallback is returned instead. This never panics.
pub fn apply<S: FareStrategy>(strategy: &S, rule: &FareRule, current_fare: f64) -> f64 {
    match S::select(rule) {
        Some(typed) => strategy.get_fare(typed, current_fare),
        None => {
            trace!(
                expected = %S::KIND,
                got = %rule.kind(),
                rule_id = rule.rule_id(),
                "rule kind mismatch, using fallback"
            );
            strategy.fallback(current_fare)
        }
    }
}

impl FareRule {
    /// Evaluate this rule with the evaluator its tag selects.
    ///
    /// `schedule` is only consulted for station rules.
    pub fn evaluate(&self, schedule: TierSchedule, current_fare: f64) -> f64 {
        match self {
            FareRule::Station(r) => DistanceTierStrategy::new(schedule).get_fare(r, current_fare),
            FareRule::Vip(r) => VipDiscountStrategy.get_fare(r, current_fare),
            FareRule::Other(r) => SurchargeStrategy.get_fare(r, current_fare),
        }
    }
}
