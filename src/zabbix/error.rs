/// Errors from the Zabbix JSON-RPC layer.
///
/// The flow layer decides severity: these are fatal when raised by login or
/// host enumeration, recorded-and-skipped when raised by the per-host
/// metric/trigger fetches.
#[derive(Debug, thiserror::Error)]
pub enum ZabbixError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("server returned error {code}: {message} {data}")]
    Api {
        code: i64,
        message: String,
        data: String,
    },

    #[error("login response carried no auth token")]
    MissingToken,

    #[error("unexpected result shape for {method}")]
    UnexpectedResult { method: &'static str },
}
