use super::error::RoutingError;
use super::point::GeoPoint;
use super::service::{GeocodeProvider, PlaceProvider};
use std::time::Duration;

/// Stand-in name when a point could not be reverse geocoded.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Debug)]
pub enum PlaceResolution {
    Resolved(String),
    Failed(RoutingError),
}

impl PlaceResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, PlaceResolution::Resolved(_))
    }

    /// The resolved name, or [`UNKNOWN_LOCATION`].
    pub fn name(&self) -> &str {
        match self {
            PlaceResolution::Resolved(name) => name,
            PlaceResolution::Failed(_) => UNKNOWN_LOCATION,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            PlaceResolution::Resolved(name) => name,
            PlaceResolution::Failed(_) => UNKNOWN_LOCATION.to_string(),
        }
    }
}

/// Reverse geocodes `point`, best effort: one call bounded by `timeout`.
pub async fn resolve_place<P: PlaceProvider>(
    provider: &P,
    point: GeoPoint,
    timeout: Duration,
) -> PlaceResolution {
    match tokio::time::timeout(timeout, provider.reverse_geocode(point)).await {
        Ok(Ok(name)) if name.trim().is_empty() => {
            PlaceResolution::Failed(RoutingError::NoResult(point.to_string()))
        }
        Ok(Ok(name)) => PlaceResolution::Resolved(name),
        Ok(Err(err)) => {
            log::warn!("Failed to reverse geocode {}: {}", point, err);
            PlaceResolution::Failed(err)
        }
        Err(_) => {
            log::warn!("Reverse geocoding {} timed out after {:?}", point, timeout);
            PlaceResolution::Failed(RoutingError::Timeout(timeout))
        }
    }
}

/// Turns user input into a coordinate: `"lat,lon"` is taken as is, anything
/// else is forward geocoded.
pub async fn resolve_input<G: GeocodeProvider>(
    provider: &G,
    input: &str,
    timeout: Duration,
) -> Result<GeoPoint, RoutingError> {
    if let Ok(point) = input.parse::<GeoPoint>() {
        return Ok(point);
    }
    let point = tokio::time::timeout(timeout, provider.geocode(input))
        .await
        .map_err(|_| RoutingError::Timeout(timeout))??;
    log::info!("Resolved \"{}\" to {}", input, point);
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl PlaceProvider for Named {
        async fn reverse_geocode(&self, _: GeoPoint) -> Result<String, RoutingError> {
            Ok(self.0.to_string())
        }
    }

    struct Offline;

    impl PlaceProvider for Offline {
        async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, RoutingError> {
            Err(RoutingError::NoResult(point.to_string()))
        }
    }

    impl GeocodeProvider for Offline {
        async fn geocode(&self, text: &str) -> Result<GeoPoint, RoutingError> {
            Err(RoutingError::NoResult(text.to_string()))
        }
    }

    struct Paris;

    impl GeocodeProvider for Paris {
        async fn geocode(&self, _: &str) -> Result<GeoPoint, RoutingError> {
            Ok(GeoPoint::new(48.8566, 2.3522))
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(1);
    const POINT: GeoPoint = GeoPoint::new(48.1, -1.6);

    #[tokio::test]
    async fn test_resolved_name() {
        let place = resolve_place(&Named("Rennes, France"), POINT, TIMEOUT).await;
        assert!(place.is_resolved());
        assert_eq!(place.name(), "Rennes, France");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_unknown_location() {
        let place = resolve_place(&Offline, POINT, TIMEOUT).await;
        assert!(!place.is_resolved());
        assert_eq!(place.into_name(), UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_blank_name_counts_as_failure() {
        let place = resolve_place(&Named("  "), POINT, TIMEOUT).await;
        assert_eq!(place.name(), UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_coordinates_skip_geocoding() {
        let point = resolve_input(&Offline, "48.1,-1.6", TIMEOUT).await.unwrap();
        assert_eq!(point, POINT);
    }

    #[tokio::test]
    async fn test_free_text_is_geocoded() {
        let point = resolve_input(&Paris, "Paris", TIMEOUT).await.unwrap();
        assert_eq!(point, GeoPoint::new(48.8566, 2.3522));
        assert!(resolve_input(&Offline, "Nowhere", TIMEOUT).await.is_err());
    }
}
