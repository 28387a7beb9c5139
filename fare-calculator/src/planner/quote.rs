//! Staged fare quoting.
//!
//! A quote always starts with the distance-tiered base fare. A VIP discount,
//! if requested, is applied to that. A surcharge, if requested, is added to
//! whatever the fare is after the optional discount, never to the
//! pre-discount base.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Tariff;
use crate::domain::StationId;
use crate::fare::{
    DistanceTierStrategy, FareRule, OTHER_RULE_ID, OtherFareRule, STATION_RULE_ID,
    StationFareRule, SurchargeStrategy, VIP_RULE_ID, VipDiscountStrategy, VipFareRule, apply,
};

/// A named flat amount added on top of the fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharge {
    pub name: String,
    pub amount: f64,
}

impl Surcharge {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// What the passenger asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Boarding station.
    pub from: StationId,

    /// Alighting station.
    pub to: StationId,

    /// Whether the VIP discount applies.
    pub vip: bool,

    /// Optional extra charge.
    pub surcharge: Option<Surcharge>,
}

impl QuoteRequest {
    /// Create a plain request with no discount and no surcharge.
    pub fn new(from: StationId, to: StationId) -> Self {
        Self {
            from,
            to,
            vip: false,
            surcharge: None,
        }
    }

    pub fn with_vip(mut self, vip: bool) -> Self {
        self.vip = vip;
        self
    }

    pub fn with_surcharge(mut self, surcharge: Surcharge) -> Self {
        self.surcharge = Some(surcharge);
        self
    }
}

/// The last stage a quote went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStage {
    BaseComputed,
    VipApplied,
    SurchargeApplied,
}

/// The fare at every stage of a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareQuote {
    pub from: StationId,
    pub to: StationId,

    /// Travel distance used for the base fare (0 if there is no valid route).
    pub distance: f64,

    /// Distance-tiered fare.
    pub base_fare: f64,

    /// Discount fraction applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_discount: Option<f64>,

    /// Fare after the VIP discount, if one was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_fare: Option<f64>,

    /// Surcharge added last, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<Surcharge>,

    /// Final accumulated fare.
    pub total_fare: f64,
}

impl FareQuote {
    /// The last stage applied.
    pub fn stage(&self) -> QuoteStage {
        if self.surcharge.is_some() {
            QuoteStage::SurchargeApplied
        } else if self.vip_fare.is_some() {
            QuoteStage::VipApplied
        } else {
            QuoteStage::BaseComputed
        }
    }
}

/// Computes quotes against one tariff.
#[derive(Debug, Clone, Default)]
pub struct FarePlanner {
    tariff: Tariff,
}

impl FarePlanner {
    pub fn new(tariff: Tariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Travel distance between two stations on this planner's line.
    ///
    /// Unknown stations and reversed direction give 0, and are logged.
    pub fn distance(&self, from: &StationId, to: &StationId) -> f64 {
        let line = &self.tariff.line;
        let from_idx = line.position(from);
        let to_idx = line.position(to);

        if from_idx.is_none() {
            warn!(station = %from, "origin is not on the line");
        }
        if to_idx.is_none() {
            warn!(station = %to, "destination is not on the line");
        }
        if let (Some(f), Some(t)) = (from_idx, to_idx) {
            if f > t {
                warn!(%from, %to, "reversed direction is not priced, distance is 0");
            }
        }

        line.distance(from, to)
    }

    /// Run every requested stage and return the fare at each.
    pub fn quote(&self, request: &QuoteRequest) -> FareQuote {
        let distance = self.distance(&request.from, &request.to);
        self.price(request, distance)
    }

    /// Run every requested stage over an already resolved distance.
    ///
    /// Lets a caller re-price the same trip stage by stage without looking
    /// the stations up again.
    pub fn price(&self, request: &QuoteRequest, distance: f64) -> FareQuote {
        let fares = &self.tariff.fares;

        let station_rule: FareRule =
            StationFareRule::new(STATION_RULE_ID, distance, fares.incremental_price).into();
        let base_fare = apply(
            &DistanceTierStrategy::new(fares.tiers),
            &station_rule,
            fares.basic_fare,
        );
        debug!(from = %request.from, to = %request.to, distance, base_fare, "base fare");

        let mut total_fare = base_fare;

        let mut vip_fare = None;
        if request.vip {
            let rule: FareRule = VipFareRule::new(VIP_RULE_ID, fares.vip_discount).into();
            total_fare = apply(&VipDiscountStrategy, &rule, total_fare);
            vip_fare = Some(total_fare);
            debug!(discount = fares.vip_discount, fare = total_fare, "vip discount applied");
        }

        if let Some(surcharge) = &request.surcharge {
            let rule: FareRule =
                OtherFareRule::new(OTHER_RULE_ID, surcharge.name.clone(), surcharge.amount).into();
            total_fare = apply(&SurchargeStrategy, &rule, total_fare);
            debug!(
                name = %surcharge.name,
                amount = surcharge.amount,
                fare = total_fare,
                "surcharge applied"
            );
        }

        FareQuote {
            from: request.from.clone(),
            to: request.to.clone(),
            distance,
            base_fare,
            vip_discount: request.vip.then_some(fares.vip_discount),
            vip_fare,
            surcharge: request.surcharge.clone(),
            total_fare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FareConfig;
    use crate::network::{LineBuilder, default_line};
    use crate::test_support::count_warnings;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn planner_with(line: crate::network::Line) -> FarePlanner {
        FarePlanner::new(Tariff::new(FareConfig::default(), line))
    }

    #[test]
    fn same_station_uses_its_own_entry() {
        let planner = FarePlanner::default();
        let quote = planner.quote(&QuoteRequest::new(id("3s"), id("3s")));

        assert_eq!(quote.distance, 1.2);
        assert_eq!(quote.base_fare, 3.0);
        assert_eq!(quote.total_fare, 3.0);
        assert_eq!(quote.stage(), QuoteStage::BaseComputed);
    }

    #[test]
    fn two_extra_tiers() {
        let planner = planner_with(LineBuilder::new().add("A", 6.0).add("B", 20.0).build());
        let quote = planner.quote(&QuoteRequest::new(id("A"), id("B")));

        assert_eq!(quote.distance, 26.0);
        assert_eq!(quote.base_fare, 5.0);
    }

    #[test]
    fn discount_then_surcharge() {
        let planner = planner_with(LineBuilder::new().add("A", 26.0).build());
        let request = QuoteRequest::new(id("A"), id("A"))
            .with_vip(true)
            .with_surcharge(Surcharge::new("luggage", 2.0));
        let quote = planner.quote(&request);

        assert_eq!(quote.base_fare, 5.0);
        assert_eq!(quote.vip_discount, Some(0.5));
        assert_eq!(quote.vip_fare, Some(2.5));
        assert_eq!(quote.total_fare, 4.5);
        assert_eq!(quote.stage(), QuoteStage::SurchargeApplied);
    }

    #[test]
    fn surcharge_without_vip_applies_to_base() {
        let planner = planner_with(LineBuilder::new().add("A", 26.0).build());
        let request =
            QuoteRequest::new(id("A"), id("A")).with_surcharge(Surcharge::new("festival", 2.0));
        let quote = planner.quote(&request);

        assert_eq!(quote.vip_fare, None);
        assert_eq!(quote.total_fare, 7.0);
    }

    #[test]
    fn vip_only() {
        let planner = FarePlanner::default();
        let quote = planner.quote(&QuoteRequest::new(id("1s"), id("2s")).with_vip(true));

        assert_eq!(quote.base_fare, 3.0);
        assert_eq!(quote.total_fare, 1.5);
        assert_eq!(quote.stage(), QuoteStage::VipApplied);
    }

    #[test]
    fn unknown_origin_is_free() {
        let planner = FarePlanner::default();
        for to in ["1s", "10s", "22s", "nowhere"] {
            let quote = planner.quote(&QuoteRequest::new(id("nowhere"), id(to)));
            assert_eq!(quote.distance, 0.0);
            assert_eq!(quote.base_fare, 0.0);
        }
    }

    #[test]
    fn reversed_direction_is_free() {
        let planner = FarePlanner::default();
        let quote = planner.quote(&QuoteRequest::new(id("10s"), id("2s")));
        assert_eq!(quote.distance, 0.0);
        assert_eq!(quote.base_fare, 0.0);
    }

    #[test]
    fn surcharge_on_a_free_trip() {
        let planner = FarePlanner::default();
        let request = QuoteRequest::new(id("10s"), id("2s"))
            .with_vip(true)
            .with_surcharge(Surcharge::new("booking", 1.0));
        assert_eq!(planner.quote(&request).total_fare, 1.0);
    }

    #[test]
    fn distance_just_past_first_tier_pays_extra() {
        let planner = planner_with(LineBuilder::new().add("A", 6.0000004).build());
        let quote = planner.quote(&QuoteRequest::new(id("A"), id("A")));

        assert_eq!(quote.distance, 6.0000004);
        assert_eq!(quote.base_fare, 4.0);
    }

    #[test]
    fn price_matches_quote() {
        let planner = FarePlanner::default();
        let request = QuoteRequest::new(id("2s"), id("9s"))
            .with_vip(true)
            .with_surcharge(Surcharge::new("luggage", 1.0));
        let distance = planner.distance(&request.from, &request.to);

        assert_eq!(planner.price(&request, distance), planner.quote(&request));
    }

    #[test]
    fn both_unknown_stations_are_logged() {
        let planner = FarePlanner::default();
        let warnings = count_warnings(|| {
            planner.quote(&QuoteRequest::new(id("nowhere"), id("elsewhere")));
        });
        assert_eq!(warnings, 2);
    }

    #[test]
    fn reversed_direction_is_logged_once() {
        let planner = FarePlanner::default();
        let warnings = count_warnings(|| {
            planner.quote(&QuoteRequest::new(id("10s"), id("2s")));
        });
        assert_eq!(warnings, 1);
    }

    #[test]
    fn known_forward_trip_is_quiet() {
        let planner = FarePlanner::default();
        let warnings = count_warnings(|| {
            planner.quote(&QuoteRequest::new(id("2s"), id("10s")));
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn default_line_trip() {
        // 1s..5s is 8.0 km: one increment past the first tier
        let planner = FarePlanner::new(Tariff::new(FareConfig::default(), default_line()));
        let quote = planner.quote(&QuoteRequest::new(id("1s"), id("5s")));
        assert_eq!(quote.distance, 8.0);
        assert_eq!(quote.base_fare, 4.0);
    }

    #[test]
    fn quote_serializes_only_applied_stages() {
        let planner = FarePlanner::default();
        let quote = planner.quote(&QuoteRequest::new(id("1s"), id("1s")));
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["from"], "1s");
        assert_eq!(json["base_fare"], 3.0);
        assert!(json.get("vip_fare").is_none());
        assert!(json.get("surcharge").is_none());
    }
}
