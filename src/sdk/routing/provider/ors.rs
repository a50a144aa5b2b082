use super::types::{DirectionsResponse, GeoResponse};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::{GeoPoint, Route};
use crate::sdk::routing::service::{GeocodeProvider, PlaceProvider, RouteProvider};
use crate::sdk::util::rate_limit::Limiter;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use std::time::Duration;

pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// openrouteservice client, either the hosted API or a self-hosted instance.
///
/// Clones share the HTTP connection pool and the rate limiter.
#[derive(Clone)]
pub struct OrsProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    // Hosted ORS mounts pelias under /geocode, self-hosted under /pelias/v1.
    geocode_path: &'static str,
    limiter: Option<Limiter>,
}

impl OrsProvider {
    pub fn remote(api_key: String, limiter: Limiter, timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: Some(api_key),
            base_url: ORS_BASE_URL.to_string(),
            geocode_path: "/geocode",
            limiter: Some(limiter),
        })
    }

    pub fn local(base_url: String, timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            geocode_path: "/pelias/v1",
            limiter: None,
        })
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.limiter {
            log::debug!("Waiting for ORS limiter before making API call...");
            limiter.until_ready().await;
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(AUTHORIZATION, key),
            None => request,
        }
    }

    async fn fetch_features(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<GeoResponse, RoutingError> {
        self.throttle().await;
        let url = format!("{}{}{}", self.base_url, self.geocode_path, endpoint);
        let response = self.authorize(self.client.get(&url)).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RoutingError::from_response(status, text));
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse GeoResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e.into()
        })
    }
}

impl RouteProvider for OrsProvider {
    async fn directions(&self, start: GeoPoint, end: GeoPoint) -> Result<Route, RoutingError> {
        self.throttle().await;
        log::debug!(
            "[PROVIDER] Calling ORS directions for {} -> {}",
            start,
            end
        );
        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);
        let body = json!({ "coordinates": [start.to_lon_lat(), end.to_lon_lat()] });

        let response = match self.authorize(self.client.post(&url)).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                    url,
                    body,
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RoutingError::from_response(status, text));
        }

        let directions: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        directions.into_route()
    }
}

impl PlaceProvider for OrsProvider {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, RoutingError> {
        log::debug!("[PROVIDER] Calling ORS reverse_geocode for {}", point);
        let query = [
            ("point.lon", point.lon.to_string()),
            ("point.lat", point.lat.to_string()),
            ("size", "1".to_string()),
        ];
        let body = self.fetch_features("/reverse", &query).await?;
        body.features
            .into_iter()
            .find_map(|f| f.properties.label)
            .ok_or_else(|| RoutingError::NoResult(point.to_string()))
    }
}

impl GeocodeProvider for OrsProvider {
    async fn geocode(&self, text: &str) -> Result<GeoPoint, RoutingError> {
        log::debug!("[PROVIDER] Calling ORS geocode for \"{}\"", text);
        let body = self.fetch_features("/search", &[("text", text.to_string())]).await?;
        let coords = body
            .features
            .first()
            .ok_or_else(|| RoutingError::NoResult(text.to_string()))?
            .geometry
            .coordinates;
        Ok(GeoPoint::from_lon_lat(coords))
    }
}
