use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

// Helper structs to parse the JSON error response from ORS
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

/// ORS error code for "Could not find routable point".
const ORS_UNROUTABLE_POINT: u32 = 2010;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    // This variant hold the structured error from the API
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u32, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error ({status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Provider returned a route with no geometry")]
    EmptyGeometry,

    #[error("No result for {0}")]
    NoResult(String),

    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),
}

impl RoutingError {
    /// Classifies a non-success response body.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        // Try to parse the structured error first
        match serde_json::from_str::<OrsErrorPayload>(&body) {
            Ok(payload) if payload.error.code == ORS_UNROUTABLE_POINT => {
                RoutingError::UnroutablePoint
            }
            Ok(payload) => RoutingError::ApiError {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => {
                log::error!(
                    "API returned non-success status: {}. Unparseable Body: {}",
                    status,
                    body
                );
                RoutingError::RawApiError {
                    status: status.as_u16(),
                    body,
                }
            }
        }
    }
}
