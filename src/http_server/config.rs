//! Listener settings for the classification API
//!
//! Read from the `http` section of the JSON config file. Every field is
//! optional; a missing field falls back to the default below.

use serde::{Deserialize, Serialize};

/// Where `POST /mutant` and `/stats` are served, and which browser origins
/// may call them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to listen on. Defaults to all interfaces.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port, 8080 unless configured. Zero is refused when the config loads.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser. Empty allows any.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Default listener on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port`, as handed to the TCP listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
