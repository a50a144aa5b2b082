use super::types::NominatimReverse;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::service::PlaceProvider;
use crate::sdk::util::rate_limit::Limiter;
use reqwest::Client;
use std::time::Duration;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim rejects requests without an identifying User-Agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct NominatimProvider {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl NominatimProvider {
    pub fn new(base_url: String, limiter: Limiter, timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }
}

impl PlaceProvider for NominatimProvider {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, RoutingError> {
        log::debug!("Waiting for Nominatim limiter before making API call...");
        self.limiter.until_ready().await;

        let url = format!("{}/reverse", self.base_url);
        log::debug!("[PROVIDER] Calling Nominatim reverse for {}", point);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RoutingError::RawApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: NominatimReverse = serde_json::from_str(&text)?;
        if let Some(error) = body.error {
            log::debug!("Nominatim has no place at {}: {}", point, error);
        }
        body.display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| RoutingError::NoResult(point.to_string()))
    }
}
