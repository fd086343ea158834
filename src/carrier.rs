use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

const CARRIER_TIMEOUT: Duration = Duration::from_secs(5);

/// One outcome for every failure mode: missing credential, transport error,
/// bad status, non-JSON body, or a response with no numeric transit field.
/// Callers cannot (and must not) distinguish them.
#[derive(Debug, thiserror::Error)]
pub enum CarrierError {
    #[error("Carrier transit time unavailable")]
    Unavailable,
}

#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Expected transit days between two pincodes, or `Unavailable`.
    async fn transit_days(&self, origin: &str, destination: &str)
        -> Result<u32, CarrierError>;
}

/// The carrier does not pin down its response schema, so the transit field
/// is probed across the shapes seen in the wild, in priority order.
fn probe_transit_days(body: &Value) -> Option<u32> {
    let accessors: [fn(&Value) -> Option<&Value>; 3] = [
        |v| v.get("tat"),
        |v| v.get("data").and_then(|d| d.get("tat")),
        |v| v.get("response").and_then(|r| r.get("tat")),
    ];

    for accessor in accessors {
        if let Some(days) = accessor(body).and_then(Value::as_f64) {
            if days.is_finite() && days >= 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                return Some(days as u32);
            }
        }
    }
    None
}

pub struct CarrierApiClient {
    api_url: String,
    token: Option<String>,
    mode_of_transport: String,
    client: reqwest::Client,
}

impl CarrierApiClient {
    pub fn new(
        api_url: String,
        token: Option<String>,
        mode_of_transport: String,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_url,
            token,
            mode_of_transport,
            client: reqwest::Client::builder().timeout(CARRIER_TIMEOUT).build()?,
        })
    }
}

#[async_trait]
impl TransitClient for CarrierApiClient {
    async fn transit_days(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<u32, CarrierError> {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!("Carrier API token not set, transit time unavailable");
            return Err(CarrierError::Unavailable);
        };

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("origin_pin", origin),
                ("destination_pin", destination),
                ("mot", &self.mode_of_transport),
            ])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Carrier request failed: {e}");
                CarrierError::Unavailable
            })?;

        if !resp.status().is_success() {
            tracing::warn!("Carrier returned status {}", resp.status());
            return Err(CarrierError::Unavailable);
        }

        // Raw text first so an HTML error page cannot blow up parsing.
        let text = resp.text().await.map_err(|e| {
            tracing::warn!("Failed to read carrier response: {e}");
            CarrierError::Unavailable
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Carrier response was not JSON: {e}");
            CarrierError::Unavailable
        })?;

        probe_transit_days(&body).ok_or_else(|| {
            tracing::warn!("Carrier response had no numeric transit field");
            CarrierError::Unavailable
        })
    }
}
