use std::env;
use std::path::PathBuf;

/// Config holds all exporter configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub export_dir: PathBuf,
    pub timeout_secs: u64,
    pub include_interfaces: bool,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// Credentials and the server URL are not validated here: empty values
    /// are sent as-is and rejected by the server side.
    pub fn load() -> Self {
        Self {
            server_url: get_env("ZBX_URL", ""),
            username: get_env("ZBX_USER", ""),
            password: get_env("ZBX_PASSWD", ""),
            export_dir: PathBuf::from(get_env("EXPORT_DIRECTORY", "export")),
            timeout_secs: get_env("ZBX_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or(30),
            include_interfaces: get_env("ZBX_INCLUDE_INTERFACES", "true")
                .parse()
                .unwrap_or(true),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
