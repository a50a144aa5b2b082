use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::service::PlaceProvider;

use super::nominatim::NominatimProvider;
use super::ors::OrsProvider;

/// Reverse geocoding backed by whichever service is configured.
#[derive(Clone)]
pub enum PlaceService {
    Nominatim(NominatimProvider),
    Ors(OrsProvider),
}

impl PlaceProvider for PlaceService {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, RoutingError> {
        match self {
            PlaceService::Nominatim(provider) => {
                log::debug!("[Place Service] Using Nominatim for reverse_geocode");
                provider.reverse_geocode(point).await
            }
            PlaceService::Ors(provider) => {
                log::debug!("[Place Service] Using ORS for reverse_geocode");
                provider.reverse_geocode(point).await
            }
        }
    }
}
