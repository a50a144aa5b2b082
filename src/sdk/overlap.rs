//! Route similarity as the share of points two routes have in common.
//!
//! The percentage is `shared / min(|a|, |b|) * 100`, rounded to two decimals.
//! `shared` is the smaller of "points of `a` found in `b`" and "points of `b`
//! found in `a`". For routes without repeated vertices the two counts agree;
//! taking the minimum keeps the metric symmetric and within `[0, 100]` when a
//! provider repeats a vertex.

use crate::sdk::routing::GeoPoint;
use geo::{Distance, Haversine};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapResult {
    /// In `[0, 100]`, two decimals.
    pub percentage: f64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverlapError {
    #[error("cannot compute the overlap of an empty route")]
    EmptyRoute,
}

pub trait OverlapStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn overlap(&self, a: &[GeoPoint], b: &[GeoPoint]) -> Result<OverlapResult, OverlapError>;
}

/// A point is shared only when both coordinates are bit-for-bit equal.
///
/// Independently sampled polylines rarely share vertices, so this reports
/// close to zero for routes that follow the same roads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchOverlap;

impl OverlapStrategy for ExactMatchOverlap {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn overlap(&self, a: &[GeoPoint], b: &[GeoPoint]) -> Result<OverlapResult, OverlapError> {
        shared_percentage(a, b, |p, q| p == q)
    }
}

/// A point is shared when the other route has a point within `tolerance_m`
/// metres (haversine distance).
#[derive(Debug, Clone, Copy)]
pub struct ProximityOverlap {
    tolerance_m: f64,
}

impl ProximityOverlap {
    pub fn new(tolerance_m: f64) -> Self {
        Self {
            tolerance_m: tolerance_m.max(0.0),
        }
    }

    pub fn tolerance_m(&self) -> f64 {
        self.tolerance_m
    }
}

impl OverlapStrategy for ProximityOverlap {
    fn name(&self) -> &'static str {
        "proximity"
    }

    fn overlap(&self, a: &[GeoPoint], b: &[GeoPoint]) -> Result<OverlapResult, OverlapError> {
        shared_percentage(a, b, |p, q| {
            Haversine.distance(geo::Point::from(*p), geo::Point::from(*q)) <= self.tolerance_m
        })
    }
}

fn shared_percentage<F>(a: &[GeoPoint], b: &[GeoPoint], same: F) -> Result<OverlapResult, OverlapError>
where
    F: Fn(&GeoPoint, &GeoPoint) -> bool,
{
    if a.is_empty() || b.is_empty() {
        return Err(OverlapError::EmptyRoute);
    }
    let count_in = |from: &[GeoPoint], other: &[GeoPoint]| {
        from.iter()
            .filter(|p| other.iter().any(|q| same(*p, q)))
            .count()
    };
    let shared = count_in(a, b).min(count_in(b, a));
    let shorter = a.len().min(b.len());
    Ok(OverlapResult {
        percentage: round_percentage(shared as f64 / shorter as f64 * 100.0),
    })
}

/// Rounds to two decimal places.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
