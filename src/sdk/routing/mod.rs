pub mod error;
pub mod geocode;
pub mod point;
pub mod provider;
pub mod route;
pub mod service;

pub use error::RoutingError;
pub use geocode::{resolve_input, resolve_place, PlaceResolution, UNKNOWN_LOCATION};
pub use point::{GeoPoint, ParsePointError, Route};
// This line works because provider/mod.rs re-exports them
pub use provider::{NominatimProvider, OrsProvider, PlaceService};
pub use route::{fetch_route, RouteFetch};
pub use service::{GeocodeProvider, PlaceProvider, RouteProvider};
