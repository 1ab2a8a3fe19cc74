use std::sync::Arc;
use rmcp::{
    ServerHandler,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    schemars, tool, Error as McpError,
};
use serde_json::Value;
use crate::provider::Provider;
use crate::tools::{records, txt};

#[derive(Clone)]
pub struct PowerDnsMcp {
    pub provider: Arc<Provider>,
}

#[tool(tool_box)]
impl PowerDnsMcp {
    #[tool(description = "List the records of a zone, optionally only one record type")]
    async fn get_records(
        &self,
        #[tool(param)]
        #[schemars(description = "Zone name, e.g. example.org.")]
        zone: String,
        #[tool(param)]
        #[schemars(description = "Only return records of this type (A, TXT, MX, ...)")]
        record_type: Option<String>,
    ) -> Result<CallToolResult, McpError> {
        records::get_records(&self.provider, zone, record_type).await
    }

    #[tool(description = "Add records to a zone, keeping existing records with the same name and type")]
    async fn append_records(
        &self,
        #[tool(param)]
        #[schemars(description = "Zone name")]
        zone: String,
        #[tool(param)]
        #[schemars(description = "Array of record objects with name/type/value and optional ttl/priority. Names are relative to the zone, \"\" is the apex.")]
        records: Value,
    ) -> Result<CallToolResult, McpError> {
        records::append_records(&self.provider, zone, records).await
    }

    #[tool(description = "Replace all records of each given name and type with exactly the records passed")]
    async fn set_records(
        &self,
        #[tool(param)]
        #[schemars(description = "Zone name")]
        zone: String,
        #[tool(param)]
        #[schemars(description = "Array of record objects with name/type/value and optional ttl/priority")]
        records: Value,
    ) -> Result<CallToolResult, McpError> {
        records::set_records(&self.provider, zone, records).await
    }

    #[tool(description = "Delete records from a zone. Returns the records that were actually removed.")]
    async fn delete_records(
        &self,
        #[tool(param)]
        #[schemars(description = "Zone name")]
        zone: String,
        #[tool(param)]
        #[schemars(description = "Array of record objects with name/type/value and optional priority")]
        records: Value,
    ) -> Result<CallToolResult, McpError> {
        records::delete_records(&self.provider, zone, records).await
    }

    #[tool(description = "Show how a TXT value will be quoted and escaped before it is stored")]
    async fn sanitize_txt(
        &self,
        #[tool(param)]
        #[schemars(description = "TXT record value, quoted or not")]
        value: String,
    ) -> Result<CallToolResult, McpError> {
        txt::sanitize_value(value)
    }
}

#[tool(tool_box)]
impl ServerHandler for PowerDnsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Manage DNS records of a PowerDNS authoritative server.".into()),
            ..Default::default()
        }
    }
}
