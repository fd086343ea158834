use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client_ip::{extract_client_ip, is_private_ip};
use crate::delivery::DeliveryWindow;
use crate::error::EddError;
use crate::pincode::valid_pincode;
use crate::AppState;

#[derive(Deserialize)]
pub struct EddQuery {
    pub pin: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedFrom {
    Query,
    Ip,
}

#[derive(Debug, Serialize)]
pub struct EddResponse {
    pub ok: bool,
    pub pincode: String,
    pub resolved_from: ResolvedFrom,
    pub tat_days: u32,
    pub edd: String,
    pub label: String,
}

/// GET /edd — resolve a destination pincode, ask the carrier for transit
/// days, apply the cutoff rule, and respond. Every failure path collapses
/// to the same "ask the user" body via `EddError`.
pub async fn estimate(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<EddQuery>,
) -> Result<Json<EddResponse>, EddError> {
    let (pincode, resolved_from) = match query.pin.as_deref().and_then(valid_pincode) {
        Some(pin) => (pin, ResolvedFrom::Query),
        None => {
            let ip = extract_client_ip(&headers, Some(peer), &state.config.client_ip_headers);
            if is_private_ip(&ip) {
                return Err(EddError::PincodeUnresolvable);
            }
            match state.geo.resolve(&ip).await {
                Some(pin) => (pin, ResolvedFrom::Ip),
                None => return Err(EddError::GeolocationMiss),
            }
        }
    };

    let tat_days = state
        .transit
        .transit_days(&state.config.origin_pincode, &pincode)
        .await?;

    let window = DeliveryWindow::compute(
        Local::now().naive_local(),
        tat_days,
        state.config.cutoff_hour,
    );

    Ok(Json(EddResponse {
        ok: true,
        pincode,
        resolved_from,
        tat_days,
        edd: window.iso_date(),
        label: window.label(),
    }))
}

/// GET /edd/debug — development aid showing what the service detected for
/// this request. 404 unless EDD_DEBUG is set; never echoes credentials.
pub async fn debug_detection(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if !state.config.edd_debug {
        return Err(StatusCode::NOT_FOUND);
    }

    let seen: Vec<Value> = state
        .config
        .client_ip_headers
        .iter()
        .map(|name| {
            let value = headers
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            json!({ "header": name, "value": value })
        })
        .collect();

    let ip = extract_client_ip(&headers, Some(peer), &state.config.client_ip_headers);
    let private = is_private_ip(&ip);

    Ok(Json(json!({
        "headers": seen,
        "peer": peer.to_string(),
        "detected_ip": ip,
        "private": private,
    })))
}
