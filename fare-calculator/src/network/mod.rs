//! Station distance table for a single linear line.
//!
//! A line is an ordered list of stations, each carrying the distance from its
//! predecessor. The first station's entry is a fixed offset rather than a
//! real hop, and is still counted when a trip starts there.
//!
//! Only one direction of travel is modelled: asking for the distance from a
//! later station back to an earlier one yields 0, exactly like an unknown
//! station does. There is no branching and no shortest-path search.

use serde::{Deserialize, Serialize};

use crate::domain::StationId;

/// Table entries are summed as integer counts of 10^-9 km when every entry
/// is exact at that precision. Summing the raw `f64` values instead lets
/// float noise cross a tier boundary: 2.2 + 2.6 + 1.2 is 6.000000000000001.
const FIXED_POINT_SCALE: f64 = 1e9;

/// Largest scaled entry handled in fixed point.
const FIXED_POINT_LIMIT: f64 = 1e30;

/// One entry of the station table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Station identifier.
    pub name: StationId,

    /// Distance from the previous station (kilometres).
    pub distance: f64,
}

/// An ordered station table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    stops: Vec<Stop>,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a line from already validated stops, in travel order.
    pub fn from_stops(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Position of a station on the line, if it is on it.
    ///
    /// If a name appears more than once the first occurrence wins.
    pub fn position(&self, station: &StationId) -> Option<usize> {
        self.stops.iter().position(|s| &s.name == station)
    }

    /// Travel distance from `from` to `to`.
    ///
    /// Sums the table entries of every station from `from` through `to`
    /// inclusive. Returns 0 if either station is not on the line or if `to`
    /// comes before `from`; callers cannot tell those cases from each other.
    pub fn distance(&self, from: &StationId, to: &StationId) -> f64 {
        let (Some(from_idx), Some(to_idx)) = (self.position(from), self.position(to)) else {
            return 0.0;
        };

        if from_idx > to_idx {
            return 0.0;
        }

        sum_distances(self.stops[from_idx..=to_idx].iter().map(|s| s.distance))
    }

    /// Stops in travel order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// Number of stations on the line.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the line has no stations.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Sum table entries.
///
/// If every entry is the nearest `f64` to a decimal with at most nine
/// places, the entries are added exactly as integers and the result is the
/// nearest `f64` to the exact decimal sum. Otherwise the raw `f64` sum is
/// returned. No entry is ever moved to a different value.
fn sum_distances(distances: impl Iterator<Item = f64> + Clone) -> f64 {
    let fixed: Option<i128> = distances.clone().map(to_fixed_point).sum();
    match fixed {
        Some(total) => total as f64 / FIXED_POINT_SCALE,
        None => distances.sum(),
    }
}

fn to_fixed_point(distance: f64) -> Option<i128> {
    let scaled = (distance * FIXED_POINT_SCALE).round();
    if !scaled.is_finite() || scaled.abs() >= FIXED_POINT_LIMIT {
        return None;
    }
    (scaled / FIXED_POINT_SCALE == distance).then_some(scaled as i128)
}

/// Builder for creating a line.
///
/// Provides a fluent API for appending stations in travel order.
#[derive(Debug, Default)]
pub struct LineBuilder {
    inner: Line,
}

impl LineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a station.
    ///
    /// Invalid identifiers and names already on the line are skipped.
    /// Negative distances are stored as 0.
    pub fn add(mut self, name: &str, distance: f64) -> Self {
        if let Ok(id) = StationId::parse(name) {
            if self.inner.position(&id).is_none() {
                self.inner.stops.push(Stop {
                    name: id,
                    distance: distance.max(0.0),
                });
            }
        }
        self
    }

    /// Build the line.
    pub fn build(self) -> Line {
        self.inner
    }
}

/// The built-in 22-station line, `1s` through `22s`.
pub fn default_line() -> Line {
    const TABLE: [(&str, f64); 22] = [
        ("1s", 1.8),
        ("2s", 1.2),
        ("3s", 1.2),
        ("4s", 1.6),
        ("5s", 2.2),
        ("6s", 2.6),
        ("7s", 1.2),
        ("8s", 1.5),
        ("9s", 1.6),
        ("10s", 2.0),
        ("11s", 2.8),
        ("12s", 0.8),
        ("13s", 1.2),
        ("14s", 3.5),
        ("15s", 1.6),
        ("16s", 1.8),
        ("17s", 1.2),
        ("18s", 2.8),
        ("19s", 2.4),
        ("20s", 1.8),
        ("21s", 2.3),
        ("22s", 2.5),
    ];

    TABLE
        .iter()
        .fold(LineBuilder::new(), |b, (name, d)| b.add(name, *d))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn line() -> Line {
        LineBuilder::new()
            .add("A", 1.0)
            .add("B", 2.0)
            .add("C", 3.0)
            .add("D", 4.0)
            .build()
    }

    #[test]
    fn empty_line() {
        let l = Line::new();
        assert!(l.is_empty());
        assert_eq!(l.len(), 0);
        assert_eq!(l.distance(&id("A"), &id("A")), 0.0);
    }

    #[test]
    fn positions() {
        let l = line();
        assert_eq!(l.position(&id("A")), Some(0));
        assert_eq!(l.position(&id("D")), Some(3));
        assert_eq!(l.position(&id("Z")), None);
    }

    #[test]
    fn forward_distance_is_inclusive() {
        let l = line();
        assert_eq!(l.distance(&id("A"), &id("B")), 3.0);
        assert_eq!(l.distance(&id("B"), &id("D")), 9.0);
        assert_eq!(l.distance(&id("A"), &id("D")), 10.0);
    }

    #[test]
    fn same_station_counts_its_own_entry() {
        let l = line();
        assert_eq!(l.distance(&id("C"), &id("C")), 3.0);
    }

    #[test]
    fn reversed_direction_is_zero() {
        let l = line();
        assert_eq!(l.distance(&id("D"), &id("A")), 0.0);
        assert_eq!(l.distance(&id("C"), &id("B")), 0.0);
    }

    #[test]
    fn unknown_station_is_zero() {
        let l = line();
        assert_eq!(l.distance(&id("Z"), &id("C")), 0.0);
        assert_eq!(l.distance(&id("A"), &id("Z")), 0.0);
        assert_eq!(l.distance(&id("Y"), &id("Z")), 0.0);
    }

    #[test]
    fn builder_skips_invalid_and_duplicates() {
        let l = LineBuilder::new()
            .add("A", 1.0)
            .add("", 5.0)
            .add("two words", 5.0)
            .add("A", 9.0)
            .add("B", -3.0)
            .build();

        assert_eq!(l.len(), 2);
        assert_eq!(l.distance(&id("A"), &id("A")), 1.0);
        assert_eq!(l.distance(&id("B"), &id("B")), 0.0);
    }

    #[test]
    fn default_line_fixture() {
        let l = default_line();
        assert_eq!(l.len(), 22);
        assert_eq!(l.position(&id("1s")), Some(0));
        assert_eq!(l.position(&id("22s")), Some(21));
        assert_eq!(l.distance(&id("1s"), &id("1s")), 1.8);
        assert_eq!(l.distance(&id("1s"), &id("4s")), 5.8);
        assert_eq!(l.distance(&id("1s"), &id("5s")), 8.0);
    }

    #[test]
    fn summed_distance_lands_on_boundary() {
        let l = default_line();
        assert_eq!(l.distance(&id("5s"), &id("7s")), 6.0);
    }

    #[test]
    fn fine_distances_are_not_rounded_away() {
        let l = LineBuilder::new().add("A", 6.0000004).add("B", 0.0000001).build();
        assert_eq!(l.distance(&id("A"), &id("A")), 6.0000004);
        assert_eq!(l.distance(&id("A"), &id("B")), 6.0000005);
    }

    #[test]
    fn entries_finer_than_fixed_point_use_raw_sum() {
        let l = LineBuilder::new().add("A", 6.00000000004).add("B", 1.0).build();
        assert_eq!(l.distance(&id("A"), &id("A")), 6.00000000004);
        assert_eq!(l.distance(&id("A"), &id("B")), 6.00000000004 + 1.0);
        assert!(l.distance(&id("A"), &id("A")) > 6.0);
    }

    #[test]
    fn default_line_total_length() {
        let l = default_line();
        let total: f64 = l.stops().map(|s| s.distance).sum();
        assert!((l.distance(&id("1s"), &id("22s")) - total).abs() < 1e-9);
        assert_eq!(l.distance(&id("1s"), &id("22s")), 41.6);
    }
}
