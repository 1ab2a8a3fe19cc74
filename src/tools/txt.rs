use rmcp::{model::{CallToolResult, Content}, Error as McpError};
use crate::sanitize::sanitize_txt;

pub fn sanitize_value(value: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(sanitize_txt(&value))]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_sanitized_value_as_text() {
        let result = sanitize_value("a\"b".into()).unwrap();
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["content"][0]["text"], "\"a\\\"b\"");
    }
}
