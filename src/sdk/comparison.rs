//! Compares two driving routes end to end.
//!
//! A request moves through `Validating → Fetching → Comparing → Resolving →
//! Done`, or stops in `Errored`. Missing input and failed route fetches end
//! the request; a failed reverse geocode only downgrades the place name to
//! [`UNKNOWN_LOCATION`](crate::sdk::routing::UNKNOWN_LOCATION).
//!
//! [`RouteComparer`] holds no per-request state, so one instance can serve
//! concurrent requests. Dropping a comparison future cancels its in-flight
//! provider calls.

use crate::sdk::intersection::{IntersectionDetector, IntersectionPoint, PlanarIntersections};
use crate::sdk::overlap::{ExactMatchOverlap, OverlapResult, OverlapStrategy};
use crate::sdk::routing::{
    fetch_route, resolve_place, GeoPoint, PlaceProvider, Route, RouteFetch, RouteProvider,
    RoutingError,
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Per external call; matches the HTTP client timeout.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Idle,
    Validating,
    Fetching,
    Comparing,
    Resolving,
    Done,
    Errored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Comparing => "comparing",
            Stage::Resolving => "resolving",
            Stage::Done => "done",
            Stage::Errored => "errored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leg {
    A,
    B,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::A => f.write_str("route A"),
            Leg::B => f.write_str("route B"),
        }
    }
}

#[derive(Error, Debug)]
#[error("{leg}: {source}")]
pub struct LegFailure {
    pub leg: Leg,
    pub source: RoutingError,
}

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("incomplete input, missing coordinates for: {}", .missing.join(", "))]
    IncompleteInput { missing: Vec<&'static str> },

    #[error("failed to fetch {}", describe_failures(.failures))]
    RouteFetchFailed { failures: Vec<LegFailure> },

    #[error("unexpected failure while {stage}: {message}")]
    UnexpectedFailure { stage: Stage, message: String },
}

fn describe_failures(failures: &[LegFailure]) -> String {
    failures
        .iter()
        .map(LegFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ComparisonError {
    /// The stage the request was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            ComparisonError::IncompleteInput { .. } => Stage::Validating,
            ComparisonError::RouteFetchFailed { .. } => Stage::Fetching,
            ComparisonError::UnexpectedFailure { stage, .. } => *stage,
        }
    }
}

/// The four endpoints of a comparison. A `None` (or non-finite) field is an
/// input the caller has not resolved to coordinates yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonRequest {
    pub origin_a: Option<GeoPoint>,
    pub destination_a: Option<GeoPoint>,
    pub origin_b: Option<GeoPoint>,
    pub destination_b: Option<GeoPoint>,
}

impl ComparisonRequest {
    pub fn new(
        origin_a: GeoPoint,
        destination_a: GeoPoint,
        origin_b: GeoPoint,
        destination_b: GeoPoint,
    ) -> Self {
        Self {
            origin_a: Some(origin_a),
            destination_a: Some(destination_a),
            origin_b: Some(origin_b),
            destination_b: Some(destination_b),
        }
    }

    /// All four points, or the names of the ones that are missing.
    fn resolved(&self) -> Result<[GeoPoint; 4], ComparisonError> {
        let fields = [
            ("origin_a", self.origin_a),
            ("destination_a", self.destination_a),
            ("origin_b", self.origin_b),
            ("destination_b", self.destination_b),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, point)| !point.is_some_and(GeoPoint::is_finite))
            .map(|(name, _)| *name)
            .collect();
        match fields.map(|(_, point)| point) {
            [Some(oa), Some(da), Some(ob), Some(db)] if missing.is_empty() => Ok([oa, da, ob, db]),
            _ => Err(ComparisonError::IncompleteInput { missing }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub route_a: Route,
    pub route_b: Route,
    pub overlap: OverlapResult,
    pub intersections: Vec<IntersectionPoint>,
    /// Name of the first intersection point, if the routes meet.
    pub entry_place: Option<String>,
    /// Name of the last intersection point, if the routes meet.
    pub exit_place: Option<String>,
}

/// Logs stage transitions for one request.
struct StageTracker {
    stage: Stage,
}

impl StageTracker {
    fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    fn advance(&mut self, next: Stage) {
        log::debug!("Comparison stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&mut self, err: ComparisonError) -> ComparisonError {
        log::warn!("Comparison failed while {}: {}", self.stage, err);
        self.stage = Stage::Errored;
        err
    }
}

pub struct RouteComparer<R, P> {
    routes: R,
    places: P,
    overlap: Box<dyn OverlapStrategy>,
    detector: Box<dyn IntersectionDetector>,
    call_timeout: Duration,
}

impl<R: RouteProvider, P: PlaceProvider> RouteComparer<R, P> {
    /// Exact-match overlap, planar intersections and [`DEFAULT_CALL_TIMEOUT`].
    pub fn new(routes: R, places: P) -> Self {
        Self {
            routes,
            places,
            overlap: Box::new(ExactMatchOverlap),
            detector: Box::new(PlanarIntersections),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_overlap_strategy(mut self, strategy: impl OverlapStrategy + 'static) -> Self {
        self.overlap = Box::new(strategy);
        self
    }

    pub fn with_intersection_detector(
        mut self,
        detector: impl IntersectionDetector + 'static,
    ) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Compares the route `origin_a → destination_a` with `origin_b → destination_b`.
    pub async fn compare(
        &self,
        origin_a: GeoPoint,
        destination_a: GeoPoint,
        origin_b: GeoPoint,
        destination_b: GeoPoint,
    ) -> Result<ComparisonResult, ComparisonError> {
        let request = ComparisonRequest::new(origin_a, destination_a, origin_b, destination_b);
        self.compare_routes(&request).await
    }

    pub async fn compare_routes(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, ComparisonError> {
        let mut tracker = StageTracker::new();

        tracker.advance(Stage::Validating);
        let [origin_a, destination_a, origin_b, destination_b] =
            request.resolved().map_err(|e| tracker.fail(e))?;

        tracker.advance(Stage::Fetching);
        let (fetch_a, fetch_b) = tokio::join!(
            fetch_route(&self.routes, origin_a, destination_a, self.call_timeout),
            fetch_route(&self.routes, origin_b, destination_b, self.call_timeout),
        );
        let (route_a, route_b) = match (fetch_a, fetch_b) {
            (RouteFetch::Fetched(a), RouteFetch::Fetched(b)) => (a, b),
            (fetch_a, fetch_b) => {
                let failures = [(Leg::A, fetch_a), (Leg::B, fetch_b)]
                    .into_iter()
                    .filter_map(|(leg, fetch)| match fetch {
                        RouteFetch::Failed(source) => Some(LegFailure { leg, source }),
                        RouteFetch::Fetched(_) => None,
                    })
                    .collect();
                return Err(tracker.fail(ComparisonError::RouteFetchFailed { failures }));
            }
        };

        tracker.advance(Stage::Comparing);
        let overlap = self
            .overlap
            .overlap(route_a.points(), route_b.points())
            .map_err(|e| {
                tracker.fail(ComparisonError::UnexpectedFailure {
                    stage: Stage::Comparing,
                    message: e.to_string(),
                })
            })?;
        let intersections = self
            .detector
            .intersections(route_a.points(), route_b.points());
        log::info!(
            "Routes overlap {:.2}% ({} strategy), {} intersection points",
            overlap.percentage,
            self.overlap.name(),
            intersections.len()
        );

        tracker.advance(Stage::Resolving);
        let (entry_place, exit_place) = match intersections.as_slice() {
            [] => (None, None),
            [only] => {
                let name = self.place_name(only.point).await;
                (Some(name.clone()), Some(name))
            }
            [first, .., last] => {
                let (entry, exit) =
                    tokio::join!(self.place_name(first.point), self.place_name(last.point));
                (Some(entry), Some(exit))
            }
        };

        tracker.advance(Stage::Done);
        Ok(ComparisonResult {
            route_a,
            route_b,
            overlap,
            intersections,
            entry_place,
            exit_place,
        })
    }

    async fn place_name(&self, point: GeoPoint) -> String {
        resolve_place(&self.places, point, self.call_timeout)
            .await
            .into_name()
    }
}
