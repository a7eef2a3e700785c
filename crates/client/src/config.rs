use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL the `/moves`, `/opening` and `/positions` paths hang off.
    pub server_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_url: env::var("REPERTOIRE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            user_agent: env::var("REPERTOIRE_USER_AGENT")
                .unwrap_or_else(|_| "Repertoire/1.0".to_string()),
        }
    }

    /// Config pointing at an explicit server, other settings from defaults.
    pub fn for_server(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "Repertoire/1.0".to_string(),
        }
    }
}
