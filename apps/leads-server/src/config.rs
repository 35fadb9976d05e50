//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connection string for the lead document store.
    pub database_url: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; without it the server refuses to start.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required"))?;

        let port = match lookup("LEADS_SERVER_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("LEADS_SERVER_PORT is not a valid port: {port}"))?,
            None => 54872,
        };

        Ok(Self {
            host: lookup("LEADS_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            log_level: lookup("LEADS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
