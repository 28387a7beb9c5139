//! Fare rule data.
//!
//! A fare rule carries the parameters one pricing adjustment needs. Rules are
//! immutable once built; the planner constructs a fresh one for each stage and
//! hands it to exactly one evaluation.

use std::fmt;

/// Rule id used for the distance-tiered base fare.
pub const STATION_RULE_ID: u32 = 1;

/// Rule id used for the VIP discount.
pub const VIP_RULE_ID: u32 = 2;

/// Rule id used for caller-supplied surcharges.
pub const OTHER_RULE_ID: u32 = 3;

/// Tag identifying which evaluator a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Station,
    Vip,
    Other,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Station => "station",
            RuleKind::Vip => "vip",
            RuleKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Distance-based rule: the trip length and the price of each extra tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationFareRule {
    rule_id: u32,
    station_distance: f64,
    incremental_price: f64,
}

impl StationFareRule {
    /// Create a station rule.
    ///
    /// Negative or NaN distances are stored as 0, which evaluates to
    /// "no valid route".
    pub fn new(rule_id: u32, station_distance: f64, incremental_price: f64) -> Self {
        let station_distance = if station_distance > 0.0 {
            station_distance
        } else {
            0.0
        };
        Self {
            rule_id,
            station_distance,
            incremental_price,
        }
    }

    pub fn rule_id(&self) -> u32 {
        self.rule_id
    }

    pub fn station_distance(&self) -> f64 {
        self.station_distance
    }

    pub fn incremental_price(&self) -> f64 {
        self.incremental_price
    }
}

/// Proportional discount, as a fraction of the fare it is applied to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VipFareRule {
    rule_id: u32,
    discount: f64,
}

impl VipFareRule {
    pub fn new(rule_id: u32, discount: f64) -> Self {
        Self { rule_id, discount }
    }

    pub fn rule_id(&self) -> u32 {
        self.rule_id
    }

    /// Fraction of the current fare taken off (0.5 halves it).
    pub fn discount(&self) -> f64 {
        self.discount
    }
}

/// A named flat surcharge. The amount is not validated and may be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherFareRule {
    rule_id: u32,
    name: String,
    additional_fare: f64,
}

impl OtherFareRule {
    pub fn new(rule_id: u32, name: impl Into<String>, additional_fare: f64) -> Self {
        Self {
            rule_id,
            name: name.into(),
            additional_fare,
        }
    }

    pub fn rule_id(&self) -> u32 {
        self.rule_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn additional_fare(&self) -> f64 {
        self.additional_fare
    }
}

/// Any fare rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FareRule {
    Station(StationFareRule),
    Vip(VipFareRule),
    Other(OtherFareRule),
}

impl FareRule {
    /// The tag selecting this rule's evaluator.
    pub fn kind(&self) -> RuleKind {
        match self {
            FareRule::Station(_) => RuleKind::Station,
            FareRule::Vip(_) => RuleKind::Vip,
            FareRule::Other(_) => RuleKind::Other,
        }
    }

    /// Provenance id. Informational only; never used in fare math.
    pub fn rule_id(&self) -> u32 {
        match self {
            FareRule::Station(r) => r.rule_id(),
            FareRule::Vip(r) => r.rule_id(),
            FareRule::Other(r) => r.rule_id(),
        }
    }
}

impl From<StationFareRule> for FareRule {
    fn from(rule: StationFareRule) -> Self {
        FareRule::Station(rule)
    }
}

impl From<VipFareRule> for FareRule {
    fn from(rule: VipFareRule) -> Self {
        FareRule::Vip(rule)
    }
}

impl From<OtherFareRule> for FareRule {
    fn from(rule: OtherFareRule) -> Self {
        FareRule::Other(rule)
    }
}
