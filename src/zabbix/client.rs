use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use super::error::ZabbixError;
use super::types::{RpcRequest, RpcResponse};

/// Zabbix JSON-RPC API client.
///
/// One client per run; the HTTP timeout is client-wide and applies to every
/// call. Holds no state beyond a monotonic request id counter.
pub struct ZabbixClient {
    endpoint: String,
    http: Client,
    next_id: AtomicU64,
}

impl ZabbixClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ZabbixError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// Perform one request/response exchange and decode the envelope.
    ///
    /// The raw response body is logged at debug level before decoding, for
    /// troubleshooting against a live server.
    async fn call(
        &self,
        method: &'static str,
        params: Value,
        auth: Option<&str>,
    ) -> Result<RpcResponse, ZabbixError> {
        let request = RpcRequest::new(method, params, auth, self.next_id.fetch_add(1, Ordering::Relaxed));

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json-rpc")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("response for {}: {}", method, body);

        if !status.is_success() {
            return Err(ZabbixError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RpcResponse = serde_json::from_str(&body)?;
        if let Some(error) = &envelope.error {
            if error.code != 0 {
                return Err(ZabbixError::Api {
                    code: error.code,
                    message: error.message.clone(),
                    data: error.data.clone(),
                });
            }
        }

        Ok(envelope)
    }

    /// Exchange credentials for an auth token via `user.login`.
    ///
    /// Credentials are forwarded as-is; an empty or rejected pair surfaces
    /// as a server-side error.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ZabbixError> {
        let params = json!({
            "user": username,
            "password": password,
        });
        let envelope = self.call("user.login", params, None).await?;

        match envelope.result {
            Some(Value::String(token)) if !token.is_empty() => Ok(token),
            _ => Err(ZabbixError::MissingToken),
        }
    }

    /// Fetch every host with its groups, templates, and interfaces embedded
    /// in one call. No pagination, no filtering.
    pub async fn list_hosts(&self, auth: &str) -> Result<Vec<Value>, ZabbixError> {
        let params = json!({
            "output": "extend",
            "selectGroups": "extend",
            "selectTemplates": "extend",
            "selectInterfaces": ["interfaceid", "ip", "port", "type"],
        });
        let envelope = self.call("host.get", params, Some(auth)).await?;
        result_array(envelope, "host.get")
    }

    /// Fetch all items for one host.
    pub async fn list_items(&self, auth: &str, host_id: &str) -> Result<Vec<Value>, ZabbixError> {
        let params = json!({
            "output": "extend",
            "hostids": [host_id],
        });
        let envelope = self.call("item.get", params, Some(auth)).await?;
        result_array(envelope, "item.get")
    }

    /// Fetch all triggers for one host.
    pub async fn list_triggers(&self, auth: &str, host_id: &str) -> Result<Vec<Value>, ZabbixError> {
        let params = json!({
            "output": "extend",
            "hostids": [host_id],
        });
        let envelope = self.call("trigger.get", params, Some(auth)).await?;
        result_array(envelope, "trigger.get")
    }
}

/// Unpack the result payload as a record array. A null or absent result is
/// an empty list; any other shape is an error.
fn result_array(envelope: RpcResponse, method: &'static str) -> Result<Vec<Value>, ZabbixError> {
    match envelope.result {
        Some(Value::Array(records)) => Ok(records),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => Err(ZabbixError::UnexpectedResult { method }),
    }
}
