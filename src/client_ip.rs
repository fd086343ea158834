use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Pick the best-guess client address from the configured header list,
/// falling back to the transport-level peer. Returns an empty string when
/// nothing usable is present; the caller treats that as "cannot resolve".
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    header_order: &[String],
) -> String {
    for name in header_order {
        let Some(value) = headers.get(name.as_str()).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        // Forwarded-for chains list the originating client first.
        let candidate = if name == "x-forwarded-for" {
            value.split(',').next().unwrap_or("")
        } else {
            value
        };
        let normalized = normalize_ip(candidate);
        if !normalized.is_empty() {
            return normalized;
        }
    }

    peer.map(|addr| normalize_ip(&addr.ip().to_string()))
        .unwrap_or_default()
}

/// Strip the IPv4-mapped IPv6 wrapper and any trailing `%zone` suffix.
pub fn normalize_ip(raw: &str) -> String {
    let mut ip = raw.trim();
    if let Some(stripped) = ip.strip_prefix("::ffff:") {
        ip = stripped;
    }
    if let Some((before_zone, _)) = ip.split_once('%') {
        ip = before_zone;
    }
    ip.to_string()
}

/// Classify an address as private/loopback so it is never forwarded to a
/// geolocation provider. Simple textual checks, not CIDR math; empty input
/// classifies as private.
pub fn is_private_ip(ip: &str) -> bool {
    if ip.is_empty() {
        return true;
    }
    if ip == "127.0.0.1" || ip == "::1" {
        return true;
    }
    if ip.starts_with("10.") || ip.starts_with("192.168.") {
        return true;
    }
    // 172.16.0.0/12: second octet 16-31
    if let Some(rest) = ip.strip_prefix("172.") {
        if let Some(second) = rest.split('.').next() {
            if let Ok(octet) = second.parse::<u8>() {
                return (16..=31).contains(&octet);
            }
        }
    }
    false
}
