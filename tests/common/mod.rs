//! In-memory providers for exercising the comparison pipeline.

#![allow(dead_code)]

use route_overlap::sdk::routing::{GeoPoint, PlaceProvider, Route, RouteProvider, RoutingError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn points(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
    coords
        .iter()
        .map(|&(lat, lon)| GeoPoint::new(lat, lon))
        .collect()
}

#[derive(Clone)]
pub enum Reply {
    Route(Vec<GeoPoint>),
    Error,
    Stall,
}

/// Answers directions requests from a fixed table keyed by (start, end).
#[derive(Clone, Default)]
pub struct FakeRoutes {
    legs: Vec<(GeoPoint, GeoPoint, Reply)>,
    calls: Arc<AtomicUsize>,
}

impl FakeRoutes {
    pub fn with(mut self, start: GeoPoint, end: GeoPoint, leg: Reply) -> Self {
        self.legs.push((start, end, leg));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteProvider for FakeRoutes {
    async fn directions(&self, start: GeoPoint, end: GeoPoint) -> Result<Route, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let leg = self
            .legs
            .iter()
            .find(|(s, e, _)| *s == start && *e == end)
            .map(|(_, _, leg)| leg.clone());
        match leg {
            Some(Reply::Route(points)) => Ok(Route::new(points)),
            Some(Reply::Error) => Err(RoutingError::ApiError {
                code: 2099,
                message: "Unknown internal error".to_string(),
            }),
            Some(Reply::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(RoutingError::NoResult("stalled".to_string()))
            }
            None => Err(RoutingError::UnroutablePoint),
        }
    }
}

/// Names every point by its coordinates, or fails every call.
#[derive(Clone, Default)]
pub struct FakePlaces {
    offline: bool,
    calls: Arc<AtomicUsize>,
}

impl FakePlaces {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn name_of(point: GeoPoint) -> String {
        format!("Place at {:.3},{:.3}", point.lat, point.lon)
    }
}

impl PlaceProvider for FakePlaces {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(RoutingError::NoResult(point.to_string()));
        }
        Ok(Self::name_of(point))
    }
}
