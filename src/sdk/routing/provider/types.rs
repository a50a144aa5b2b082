use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::{GeoPoint, Route};
use serde::Deserialize;

// --- openrouteservice directions (GeoJSON flavour) ---

#[derive(Deserialize)]
pub struct DirectionsResponse {
    pub features: Vec<DirectionsFeature>,
}
#[derive(Deserialize)]
pub struct DirectionsFeature {
    pub geometry: LineGeometry,
}
#[derive(Deserialize)]
pub struct LineGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl DirectionsResponse {
    /// Takes the first route's geometry, swapping `[lon, lat]` into `GeoPoint`.
    pub fn into_route(self) -> Result<Route, RoutingError> {
        let feature = self
            .features
            .into_iter()
            .next()
            .ok_or(RoutingError::EmptyGeometry)?;
        if feature.geometry.coordinates.is_empty() {
            return Err(RoutingError::EmptyGeometry);
        }
        Ok(feature
            .geometry
            .coordinates
            .into_iter()
            .map(GeoPoint::from_lon_lat)
            .collect())
    }
}

// --- openrouteservice / pelias geocoding ---

#[derive(Deserialize)]
pub struct GeoResponse {
    pub features: Vec<Feature>,
}
#[derive(Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}
#[derive(Deserialize)]
pub struct Geometry {
    pub coordinates: [f64; 2],
}
#[derive(Deserialize, Default)]
pub struct FeatureProperties {
    pub label: Option<String>,
}

// --- Nominatim reverse geocoding ---

#[derive(Deserialize)]
pub struct NominatimReverse {
    pub display_name: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_swap_lon_lat() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"summary": {"distance": 1200.5, "duration": 180.2}},
                "geometry": {"type": "LineString", "coordinates": [[-1.6778, 48.1173], [-1.6801, 48.1102]]}
            }]
        }"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        let route = parsed.into_route().unwrap();
        assert_eq!(
            route.points(),
            &[
                GeoPoint::new(48.1173, -1.6778),
                GeoPoint::new(48.1102, -1.6801)
            ]
        );
    }

    #[test]
    fn test_directions_without_features_is_empty_geometry() {
        let parsed: DirectionsResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(matches!(
            parsed.into_route(),
            Err(RoutingError::EmptyGeometry)
        ));
    }

    #[test]
    fn test_directions_with_no_coordinates_is_empty_geometry() {
        let body = r#"{"features": [{"geometry": {"coordinates": []}}]}"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            parsed.into_route(),
            Err(RoutingError::EmptyGeometry)
        ));
    }

    #[test]
    fn test_geocode_feature_label() {
        let body = r#"{"features": [{"geometry": {"coordinates": [2.3522, 48.8566]}, "properties": {"label": "Paris, France"}}]}"#;
        let parsed: GeoResponse = serde_json::from_str(body).unwrap();
        let feature = &parsed.features[0];
        assert_eq!(feature.properties.label.as_deref(), Some("Paris, France"));
        assert_eq!(
            GeoPoint::from_lon_lat(feature.geometry.coordinates),
            GeoPoint::new(48.8566, 2.3522)
        );
    }

    #[test]
    fn test_nominatim_error_payload() {
        let parsed: NominatimReverse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(parsed.display_name.is_none());
        assert_eq!(parsed.error.as_deref(), Some("Unable to geocode"));
    }
}
