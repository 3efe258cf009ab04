//! Client configuration: where the parser server lives and how decode
//! failures are handled. Values come from serde, builder setters, or
//! `TWEEBO_*` environment variables.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

pub const ENV_HOST: &str = "TWEEBO_HOST";
pub const ENV_PORT: &str = "TWEEBO_PORT";
pub const ENV_MAX_DECODE_RETRIES: &str = "TWEEBO_MAX_DECODE_RETRIES";
pub const ENV_LOG_ON_FAILURE: &str = "TWEEBO_LOG_ON_FAILURE";

/// Where the parser server lives and how failures are handled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Retries after the first attempt when a 2xx body cannot be decoded.
    #[serde(default = "default_max_decode_retries")]
    pub max_decode_retries: u32,
    /// Write the raw body of a final decode failure to the log sink.
    #[serde(default)]
    pub log_on_failure: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_decode_retries() -> u32 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_decode_retries: default_max_decode_retries(),
            log_on_failure: false,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any `TWEEBO_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(retries) = lookup(ENV_MAX_DECODE_RETRIES) {
            config.max_decode_retries = parse_var(ENV_MAX_DECODE_RETRIES, &retries)?;
        }
        if let Some(flag) = lookup(ENV_LOG_ON_FAILURE) {
            config.log_on_failure = parse_var(ENV_LOG_ON_FAILURE, &flag)?;
        }
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_decode_retries(mut self, retries: u32) -> Self {
        self.max_decode_retries = retries;
        self
    }

    pub fn with_log_on_failure(mut self, enabled: bool) -> Self {
        self.log_on_failure = enabled;
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{key}={value:?}")))
}
