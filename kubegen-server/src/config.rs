use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Reject requests that set more than one resource slot instead of
    /// picking the first by priority.
    pub strict_one_of: bool,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            strict_one_of: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(addr) = lookup("KUBEGEN_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("Invalid KUBEGEN_BIND_ADDR: '{}'", addr))?;
        }

        if let Some(strict) = lookup("KUBEGEN_STRICT_ONE_OF") {
            config.strict_one_of = match strict.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(anyhow!(
                        "Invalid KUBEGEN_STRICT_ONE_OF: '{}' (expected true or false)",
                        other
                    ))
                }
            };
        }

        if let Some(limit) = lookup("KUBEGEN_MAX_BODY_BYTES") {
            config.max_body_bytes = limit
                .parse()
                .with_context(|| format!("Invalid KUBEGEN_MAX_BODY_BYTES: '{}'", limit))?;
        }

        Ok(config)
    }
}
