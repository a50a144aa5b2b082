use super::error::RoutingError;
use super::point::{GeoPoint, Route};
use std::future::Future;

pub trait RouteProvider: Send + Sync {
    /// Gets the driving geometry between two points, in traversal order.
    fn directions(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> impl Future<Output = Result<Route, RoutingError>> + Send;
}

pub trait PlaceProvider: Send + Sync {
    /// Finds a display name for a coordinate.
    fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<String, RoutingError>> + Send;
}

pub trait GeocodeProvider: Send + Sync {
    /// Geocodes free text to the best matching coordinate.
    fn geocode(&self, text: &str) -> impl Future<Output = Result<GeoPoint, RoutingError>> + Send;
}
