use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub origin_pincode: String,
    pub carrier_api_url: String,
    pub carrier_api_token: Option<String>,
    pub mode_of_transport: String,
    pub ipinfo_token: Option<String>,
    pub geo_provider_order: Vec<String>,
    pub client_ip_headers: Vec<String>,
    pub cutoff_hour: u32,
    pub edd_debug: bool,
}

/// Split a comma-separated env value into trimmed, lowercased, non-empty entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            origin_pincode: env::var("ORIGIN_PINCODE")?,
            carrier_api_url: env::var("CARRIER_API_URL")?,
            carrier_api_token: env::var("CARRIER_API_TOKEN").ok().filter(|s| !s.is_empty()),
            mode_of_transport: env::var("MODE_OF_TRANSPORT").unwrap_or_else(|_| "S".to_string()),
            ipinfo_token: env::var("IPINFO_TOKEN").ok().filter(|s| !s.is_empty()),
            geo_provider_order: parse_list(
                &env::var("GEO_PROVIDER_ORDER").unwrap_or_else(|_| "ipinfo,ip-api".to_string()),
            ),
            client_ip_headers: parse_list(&env::var("CLIENT_IP_HEADERS").unwrap_or_else(|_| {
                "x-client-ip,cf-connecting-ip,x-forwarded-for,x-real-ip".to_string()
            })),
            cutoff_hour: env::var("CUTOFF_HOUR")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            edd_debug: env::var("EDD_DEBUG")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }
}
