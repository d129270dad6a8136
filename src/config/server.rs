//! Dashboard server settings

use std::path::PathBuf;

/// Default location of the generated fact table
pub const DEFAULT_DATA_PATH: &str = "data/loss_experience.csv";

/// Host, port and debug toggle for the local dashboard endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Log every recomputation at debug level
    pub debug: bool,
    /// Fact table to load at startup
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            debug: false,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}
