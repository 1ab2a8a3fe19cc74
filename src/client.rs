use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::record::{RRSet, Zone};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("PowerDNS API not reachable: {0}")]
    ConnectionFailed(#[from] reqwest::Error),
    #[error("Unauthorized — check the PowerDNS API key")]
    Unauthorized,
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),
    #[error("PowerDNS API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid JSON from PowerDNS: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Thin client over the PowerDNS zones API.
#[derive(Clone)]
pub struct PdnsClient {
    client: Client,
    base_url: String,
    server_id: String,
    token: String,
}

impl PdnsClient {
    pub fn new(config: &ProviderConfig, token: String) -> Self {
        Self::with_base_url(token, config.server_url.clone(), config.server_id.clone())
    }

    pub fn with_base_url(token: String, base_url: String, server_id: String) -> Self {
        Self { client: Client::new(), base_url, server_id, token }
    }

    fn zone_url(&self, zone: &str) -> String {
        format!("{}/api/v1/servers/{}/zones/{}", self.base_url, self.server_id, zone)
    }

    pub async fn get_zone(&self, zone: &str) -> Result<Zone, ClientError> {
        let url = self.zone_url(zone);
        tracing::debug!(%url, "GET zone");
        let resp = self.client
            .get(&url)
            .header("X-API-Key", &self.token)
            .send()
            .await?;

        let text = check_status(resp, zone).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends one PATCH carrying every rrset change. Nothing is sent for an
    /// empty change list.
    pub async fn patch_rrsets(&self, zone: &str, rrsets: &[RRSet]) -> Result<(), ClientError> {
        if rrsets.is_empty() {
            return Ok(());
        }
        let url = self.zone_url(zone);
        tracing::debug!(%url, rrsets = rrsets.len(), "PATCH zone");
        let resp = self.client
            .patch(&url)
            .header("X-API-Key", &self.token)
            .json(&json!({ "rrsets": rrsets }))
            .send()
            .await?;

        check_status(resp, zone).await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response, zone: &str) -> Result<String, ClientError> {
    let status = resp.status();
    tracing::debug!(status = status.as_u16(), "PowerDNS response");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => return Err(ClientError::ZoneNotFound(zone.to_string())),
        _ => {}
    }

    let text = resp.text().await?;
    if status.is_success() {
        return Ok(text);
    }

    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(text);
    Err(ClientError::Api { status: status.as_u16(), message })
}
