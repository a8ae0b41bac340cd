use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Fallback secret for local runs. Never rely on it outside development.
pub const DEFAULT_API_KEY: &str = "dev-secret-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory { seed: bool },
    Document { path: PathBuf },
}

/// Service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_key: String,
    pub environment: Environment,
    pub backend: StoreBackend,
    pub strict_description: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            api_key: DEFAULT_API_KEY.to_string(),
            environment: Environment::Development,
            backend: StoreBackend::Memory { seed: true },
            strict_description: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .with_context(|| "parse BIND_ADDR")?;

        let api_key = match lookup("API_KEY").filter(|key| !key.is_empty()) {
            Some(key) => key,
            None => {
                tracing::warn!("API_KEY not set, using insecure default '{DEFAULT_API_KEY}'");
                DEFAULT_API_KEY.to_string()
            }
        };

        let environment = match lookup("APP_ENV").as_deref() {
            Some(env) if env.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        };

        let backend = match lookup("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory {
                seed: parse_flag(lookup("SEED_PRODUCTS"), true).with_context(|| "parse SEED_PRODUCTS")?,
            },
            "document" => StoreBackend::Document {
                path: lookup("DOCUMENT_PATH")
                    .unwrap_or_else(|| "data/products.json".to_string())
                    .into(),
            },
            other => bail!("unknown STORE_BACKEND '{other}' (expected 'memory' or 'document')"),
        };

        let strict_description =
            parse_flag(lookup("STRICT_DESCRIPTION"), false).with_context(|| "parse STRICT_DESCRIPTION")?;

        Ok(Self {
            bind_addr,
            api_key,
            environment,
            backend,
            strict_description,
        })
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> Result<bool> {
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("expected a boolean, got '{other}'"),
    }
}
