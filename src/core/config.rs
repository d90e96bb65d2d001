//! Process configuration read from the environment
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add DISCORD_API_URL for followup webhooks
//! - 1.0.0: Initial env-based configuration

use anyhow::{anyhow, Result};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_INDEX_API_URL: &str = "https://btd-Index-api.hop.sh";
pub const DEFAULT_LCD_API_URL: &str = "https://toastersticks.is-a.dev";
pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// Hex-encoded Ed25519 key used to verify inbound webhooks
    pub public_key: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub index_api_url: String,
    pub lcd_api_url: String,
    pub discord_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };
        let optional =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = optional("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse()
            .map_err(|e| anyhow!("BIND_ADDR '{bind_addr}' is not a socket address: {e}"))?;

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            public_key: required("PUBLIC_KEY")?,
            bind_addr,
            log_level: optional("LOG_LEVEL", "info"),
            data_dir: PathBuf::from(optional("DATA_DIR", "data")),
            index_api_url: trim_base(optional("INDEX_API_URL", DEFAULT_INDEX_API_URL)),
            lcd_api_url: trim_base(optional("LCD_API_URL", DEFAULT_LCD_API_URL)),
            discord_api_url: trim_base(optional("DISCORD_API_URL", DEFAULT_DISCORD_API_URL)),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("index_api_url", &self.index_api_url)
            .field("lcd_api_url", &self.lcd_api_url)
            .field("discord_api_url", &self.discord_api_url)
            .finish()
    }
}
