use rmcp::{model::{CallToolResult, Content}, Error as McpError};
use serde_json::Value;
use crate::provider::{Provider, ProviderError};
use crate::record::Record;

pub fn provider_err(e: ProviderError) -> McpError {
    match e {
        ProviderError::InvalidRecord(msg) => McpError::invalid_params(msg, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

pub fn result_text(v: &impl serde::Serialize) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(v).unwrap_or_default()
    )])
}

pub fn parse_records(records: Value) -> Result<Vec<Record>, McpError> {
    serde_json::from_value(records).map_err(|e| {
        McpError::invalid_params(format!("records must be an array of {{name, type, value, ttl?, priority?}}: {e}"), None)
    })
}

pub async fn get_records(
    provider: &Provider,
    zone: String,
    record_type: Option<String>,
) -> Result<CallToolResult, McpError> {
    let mut records = provider.get_records(&zone).await.map_err(provider_err)?;
    if let Some(t) = record_type {
        records.retain(|r| r.rtype.eq_ignore_ascii_case(&t));
    }
    Ok(result_text(&records))
}

pub async fn append_records(
    provider: &Provider,
    zone: String,
    records: Value,
) -> Result<CallToolResult, McpError> {
    let records = parse_records(records)?;
    let r = provider.append_records(&zone, &records).await.map_err(provider_err)?;
    Ok(result_text(&r))
}

pub async fn set_records(
    provider: &Provider,
    zone: String,
    records: Value,
) -> Result<CallToolResult, McpError> {
    let records = parse_records(records)?;
    let r = provider.set_records(&zone, &records).await.map_err(provider_err)?;
    Ok(result_text(&r))
}

pub async fn delete_records(
    provider: &Provider,
    zone: String,
    records: Value,
) -> Result<CallToolResult, McpError> {
    let records = parse_records(records)?;
    let r = provider.delete_records(&zone, &records).await.map_err(provider_err)?;
    Ok(result_text(&r))
}
