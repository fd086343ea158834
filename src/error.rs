use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::carrier::CarrierError;

/// Fixed user-facing string for every failure class. The storefront UI has
/// a single fallback branch: ask the shopper to type their pincode.
pub const ASK_PINCODE_MESSAGE: &str = "Please enter pincode.";

/// Internal failure classes, kept structured for logging. At the response
/// boundary they all collapse to the same `{ok:false}` body with HTTP 200;
/// this endpoint never signals a fault distinguishable from "ask the user".
#[derive(Debug, thiserror::Error)]
pub enum EddError {
    #[error("No usable pincode or client address")]
    PincodeUnresolvable,

    #[error("Geolocation providers exhausted without a pincode")]
    GeolocationMiss,

    #[error("Carrier transit time unavailable")]
    CarrierUnavailable,

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<CarrierError> for EddError {
    fn from(_: CarrierError) -> Self {
        Self::CarrierUnavailable
    }
}

impl IntoResponse for EddError {
    fn into_response(self) -> Response {
        match &self {
            Self::PincodeUnresolvable | Self::GeolocationMiss => {
                tracing::debug!("EDD resolution failed: {self}");
            }
            Self::CarrierUnavailable => {
                tracing::warn!("EDD carrier failure: {self}");
            }
            Self::Unexpected(e) => {
                tracing::error!("EDD unexpected failure: {e}");
            }
        }

        (
            StatusCode::OK,
            Json(json!({ "ok": false, "message": ASK_PINCODE_MESSAGE })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_maps_to_200() {
        for err in [
            EddError::PincodeUnresolvable,
            EddError::GeolocationMiss,
            EddError::CarrierUnavailable,
            EddError::Unexpected("boom".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[test]
    fn test_unexpected_hides_details_from_message() {
        // The body is the fixed message regardless of the inner detail.
        assert_eq!(ASK_PINCODE_MESSAGE, "Please enter pincode.");
    }

    #[test]
    fn test_carrier_error_converts() {
        let err: EddError = CarrierError::Unavailable.into();
        assert!(matches!(err, EddError::CarrierUnavailable));
    }
}
