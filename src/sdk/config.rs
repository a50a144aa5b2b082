use crate::sdk::comparison::DEFAULT_CALL_TIMEOUT;
use crate::sdk::routing::provider::NOMINATIM_BASE_URL;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrsConfig {
    /// Hosted openrouteservice, authenticated with an API key.
    Remote { api_key: String },
    /// Self-hosted instance; no key, no rate limit.
    Local { base_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceBackend {
    Nominatim,
    Ors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub ors: OrsConfig,
    pub places: PlaceBackend,
    pub nominatim_base_url: String,
    pub request_timeout: Duration,
    /// When set, overlap counts points within this many metres as shared.
    pub overlap_tolerance_m: Option<f64>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("set ORS_API_KEY for the hosted API or ORS_BASE_URL for a self-hosted instance")]
    MissingOrs,

    #[error("invalid value for {name}: \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // A self-hosted instance takes precedence over the hosted API.
        let ors = match (get("ORS_BASE_URL"), get("ORS_API_KEY")) {
            (Some(base_url), _) => OrsConfig::Local { base_url },
            (None, Some(api_key)) => OrsConfig::Remote { api_key },
            (None, None) => return Err(ConfigError::MissingOrs),
        };

        let places = match get("PLACE_PROVIDER").as_deref().map(str::to_ascii_lowercase) {
            None => PlaceBackend::Nominatim,
            Some(v) if v == "nominatim" => PlaceBackend::Nominatim,
            Some(v) if v == "ors" => PlaceBackend::Ors,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    name: "PLACE_PROVIDER",
                    value,
                })
            }
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_CALL_TIMEOUT,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        let overlap_tolerance_m = match get("OVERLAP_TOLERANCE_M") {
            None => None,
            Some(value) => match value.trim().parse::<f64>() {
                Ok(metres) if metres.is_finite() && metres >= 0.0 => Some(metres),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "OVERLAP_TOLERANCE_M",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            ors,
            places,
            nominatim_base_url: get("NOMINATIM_BASE_URL")
                .unwrap_or_else(|| NOMINATIM_BASE_URL.to_string()),
            request_timeout,
            overlap_tolerance_m,
        })
    }
}
