use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// --- JSON-RPC envelope ---

/// JSON-RPC 2.0 request body. `auth` is omitted for `user.login` only.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
    pub id: u64,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value, auth: Option<&'a str>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            auth,
            id,
        }
    }
}

/// JSON-RPC 2.0 response envelope. The server sends
/// `{jsonrpc, result, error, id}`; only `result` and `error` are consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Error triple carried in a response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: String,
}

// --- Raw API records ---

/// Host record as returned by `host.get` with groups, templates, and
/// interfaces selected. `hostid`, `name`, and `status` must be present;
/// everything else defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHost {
    pub hostid: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub available: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub groups: Vec<RawGroup>,
    #[serde(rename = "parentTemplates", default)]
    pub parent_templates: Vec<RawTemplate>,
    #[serde(default)]
    pub interfaces: Vec<RawInterface>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    pub groupid: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTemplate {
    pub templateid: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInterface {
    pub interfaceid: String,
    pub ip: String,
    #[serde(default)]
    pub port: String,
    #[serde(rename = "type", default)]
    pub interface_type: String,
}

/// Item record as returned by `item.get`. All four fields must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub itemid: String,
    pub name: String,
    #[serde(rename = "key_")]
    pub key: String,
    pub lastvalue: String,
}

/// Trigger record as returned by `trigger.get`. Display fields tolerate
/// missing or mistyped values, decoding to the empty string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrigger {
    pub triggerid: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub priority: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub status: String,
}

/// Accept any JSON value, keeping strings and turning everything else into
/// the empty string.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}
