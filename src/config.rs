pub const DEFAULT_SERVER_ID: &str = "localhost";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PDNS_SERVER_URL is not set — point it at the PowerDNS API, e.g. http://localhost:8081")]
    MissingServerUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub server_url: String,
    pub server_id: String,
    pub debug: bool,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Testable inner function — takes the variable lookup as a parameter
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = lookup("PDNS_SERVER_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingServerUrl)?;
        let server_id = lookup("PDNS_SERVER_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_ID.to_string());
        let debug = lookup("PDNS_DEBUG").is_some_and(|v| is_truthy(&v));

        Ok(Self { server_url, server_id, debug })
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}
