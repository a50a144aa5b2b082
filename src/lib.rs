pub mod sdk;

pub use sdk::comparison::{
    ComparisonError, ComparisonRequest, ComparisonResult, RouteComparer, Stage,
};
pub use sdk::config::ProviderConfig;
pub use sdk::intersection::{find_intersections, IntersectionKind, IntersectionPoint};
pub use sdk::overlap::{ExactMatchOverlap, OverlapResult, OverlapStrategy, ProximityOverlap};
pub use sdk::routing::{GeoPoint, Route, RoutingError, UNKNOWN_LOCATION};
