//! Fare evaluators.
//!
//! Each evaluator is bound to one rule variant through [`FareStrategy::Rule`],
//! so a typed call can never be handed the wrong kind of rule. The untyped
//! path through [`super::apply`] narrows a [`FareRule`] by its tag first and
//! falls back to [`FareStrategy::fallback`] on a mismatch.

use serde::{Deserialize, Serialize};

use super::rules::{FareRule, OtherFareRule, RuleKind, StationFareRule, VipFareRule};

/// Produces a new fare from rule data and the fare as it currently stands.
///
/// Implementations are pure: the result depends only on the two inputs.
pub trait FareStrategy {
    /// The rule variant this evaluator understands.
    type Rule;

    /// The tag of [`Self::Rule`].
    const KIND: RuleKind;

    /// Evaluate `rule` against `current_fare`.
    fn get_fare(&self, rule: &Self::Rule, current_fare: f64) -> f64;

    /// Value returned when this evaluator is handed a rule of another kind.
    fn fallback(&self, current_fare: f64) -> f64;

    /// Narrow a generic rule to this evaluator's variant.
    fn select(rule: &FareRule) -> Option<&Self::Rule>;
}

/// Distance brackets for the tiered base fare.
///
/// Trips shorter than `base_distance` pay the basic fare. Every further
/// `increment_distance`, or part of one, adds one incremental price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSchedule {
    pub base_distance: f64,
    pub increment_distance: f64,
}

impl TierSchedule {
    pub fn new(base_distance: f64, increment_distance: f64) -> Self {
        Self {
            base_distance,
            increment_distance,
        }
    }

    /// Number of charged increments beyond the base tier.
    ///
    /// Partial increments round up. Returns 0 inside the base tier. Kept as
    /// `f64` so very long distances are never truncated to an integer width.
    pub fn extra_tiers(&self, distance: f64) -> f64 {
        if distance < self.base_distance {
            return 0.0;
        }
        ((distance - self.base_distance) / self.increment_distance).ceil()
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            base_distance: 6.0,
            increment_distance: 10.0,
        }
    }
}

/// Distance-tiered base fare. `current_fare` is the basic fare.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceTierStrategy {
    pub schedule: TierSchedule,
}

impl DistanceTierStrategy {
    pub fn new(schedule: TierSchedule) -> Self {
        Self { schedule }
    }
}

impl FareStrategy for DistanceTierStrategy {
    type Rule = StationFareRule;
    const KIND: RuleKind = RuleKind::Station;

    fn get_fare(&self, rule: &StationFareRule, basic_fare: f64) -> f64 {
        let distance = rule.station_distance();

        if !distance.is_finite() || distance <= 0.0 {
            return 0.0;
        }

        if distance < self.schedule.base_distance {
            return basic_fare;
        }

        let extra = self.schedule.extra_tiers(distance);
        basic_fare + extra * rule.incremental_price()
    }

    fn fallback(&self, _current_fare: f64) -> f64 {
        0.0
    }

    fn select(rule: &FareRule) -> Option<&StationFareRule> {
        match rule {
            FareRule::Station(r) => Some(r),
            _ => None,
        }
    }
}

/// Proportional discount applied to the fare as it stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VipDiscountStrategy;

impl FareStrategy for VipDiscountStrategy {
    type Rule = VipFareRule;
    const KIND: RuleKind = RuleKind::Vip;

    fn get_fare(&self, rule: &VipFareRule, current_fare: f64) -> f64 {
        current_fare - current_fare * rule.discount()
    }

    fn fallback(&self, _current_fare: f64) -> f64 {
        0.0
    }

    fn select(rule: &FareRule) -> Option<&VipFareRule> {
        match rule {
            FareRule::Vip(r) => Some(r),
            _ => None,
        }
    }
}

/// Flat surcharge added to the fare as it stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurchargeStrategy;

impl FareStrategy for SurchargeStrategy {
    type Rule = OtherFareRule;
    const KIND: RuleKind = RuleKind::Other;

    fn get_fare(&self, rule: &OtherFareRule, current_fare: f64) -> f64 {
        current_fare + rule.additional_fare()
    }

    fn fallback(&self, current_fare: f64) -> f64 {
        current_fare
    }

    fn select(rule: &FareRule) -> Option<&OtherFareRule> {
        match rule {
            FareRule::Other(r) => Some(r),
            _ => None,
        }
    }
}
