use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::pincode::valid_pincode;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Geolocation request failed: {0}")]
    RequestFailed(String),
}

/// One IP-geolocation provider. `lookup` returns `Ok(None)` when the
/// provider answered but had no usable postal code for the address.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn lookup(&self, ip: &str) -> Result<Option<String>, GeoError>;
}

/// Resolves an IP to a validated pincode, however that is done. Split out
/// as a trait so route handlers can be tested without network access.
#[async_trait]
pub trait PincodeResolver: Send + Sync {
    async fn resolve(&self, ip: &str) -> Option<String>;
}

/// Pull a postal-code field out of an untrusted provider document. Missing
/// or non-string fields yield `None`, never a fault; the value is then held
/// to the same 6-digit check as user input.
fn postal_from_value(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).and_then(valid_pincode)
}

/// Fetch a provider URL and parse the body defensively: raw text first,
/// then JSON, so an HTML error page degrades to "no result".
async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value, GeoError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| GeoError::RequestFailed(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(GeoError::RequestFailed(format!("status {}", resp.status())));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| GeoError::RequestFailed(e.to_string()))?;

    serde_json::from_str(&text).map_err(|e| GeoError::RequestFailed(e.to_string()))
}

// --- ipinfo.io (token required) ---

pub struct IpinfoProvider {
    token: String,
    client: reqwest::Client,
}

impl IpinfoProvider {
    pub fn new(token: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            token,
            client: reqwest::Client::builder().timeout(PROVIDER_TIMEOUT).build()?,
        })
    }
}

#[async_trait]
impl GeoProvider for IpinfoProvider {
    fn name(&self) -> &'static str {
        "ipinfo"
    }

    async fn lookup(&self, ip: &str) -> Result<Option<String>, GeoError> {
        let url = format!("https://ipinfo.io/{ip}/json?token={}", self.token);
        let body = fetch_json(&self.client, &url).await?;
        Ok(postal_from_value(&body, "postal"))
    }
}

// --- ip-api.com (keyless, free tier is HTTP-only) ---

pub struct IpApiProvider {
    client: reqwest::Client,
}

impl IpApiProvider {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(PROVIDER_TIMEOUT).build()?,
        })
    }
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    fn name(&self) -> &'static str {
        "ip-api"
    }

    async fn lookup(&self, ip: &str) -> Result<Option<String>, GeoError> {
        let url = format!("http://ip-api.com/json/{ip}");
        let body = fetch_json(&self.client, &url).await?;
        Ok(postal_from_value(&body, "zip"))
    }
}

// --- Ordered fallback chain ---

pub struct ProviderChain {
    providers: Vec<Box<dyn GeoProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn GeoProvider>>) -> Self {
        Self { providers }
    }

    /// Build the chain from the configured priority order. A provider whose
    /// credential is missing is skipped entirely, not attempted and failed.
    pub fn from_config(
        order: &[String],
        ipinfo_token: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let mut providers: Vec<Box<dyn GeoProvider>> = Vec::new();
        for name in order {
            match name.as_str() {
                "ipinfo" => {
                    if let Some(token) = ipinfo_token {
                        providers.push(Box::new(IpinfoProvider::new(token.to_string())?));
                    } else {
                        tracing::debug!("ipinfo token not set, skipping provider");
                    }
                }
                "ip-api" => providers.push(Box::new(IpApiProvider::new()?)),
                other => tracing::warn!("Unknown geolocation provider '{other}', ignoring"),
            }
        }
        Ok(Self::new(providers))
    }
}

#[async_trait]
impl PincodeResolver for ProviderChain {
    async fn resolve(&self, ip: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.lookup(ip).await {
                Ok(Some(pin)) => {
                    tracing::debug!("Resolved {ip} to {pin} via {}", provider.name());
                    return Some(pin);
                }
                Ok(None) => {
                    tracing::debug!("{} had no pincode for {ip}", provider.name());
                }
                Err(e) => {
                    tracing::warn!("{} lookup failed for {ip}: {e}", provider.name());
                }
            }
        }
        None
    }
}
