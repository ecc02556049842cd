// src/core/config_manager.rs
//! Unified configuration management - single load path for all settings

use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Listing defaults shared by the state layer and the handlers.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub page_size: usize,
}

impl ConfigManager {
    /// Load all configurations from the environment.
    pub fn load() -> Result<Self> {
        let server = Self::load_server()?;
        let backend = Self::load_backend()?;
        let listing = Self::load_listing()?;

        info!(
            "Configuration loaded: port={}, backend={}, page_size={}",
            server.port, backend.base_url, listing.page_size
        );

        Ok(Self {
            server,
            backend,
            listing,
        })
    }

    fn load_server() -> Result<ServerConfig> {
        let port = match std::env::var("PORTAL_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("PORTAL_PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ServerConfig { port })
    }

    fn load_backend() -> Result<BackendConfig> {
        let base_url =
            std::env::var("JOBS_API_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let timeout_seconds = match std::env::var("JOBS_API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("JOBS_API_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(BackendConfig {
            base_url: normalize_base_url(base_url),
            timeout_seconds,
        })
    }

    fn load_listing() -> Result<ListingConfig> {
        let page_size = match std::env::var("PORTAL_PAGE_SIZE") {
            Ok(raw) => {
                let parsed = raw
                    .parse::<usize>()
                    .context("PORTAL_PAGE_SIZE must be a positive number")?;
                if parsed == 0 {
                    anyhow::bail!("PORTAL_PAGE_SIZE must be greater than zero");
                }
                parsed
            }
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(ListingConfig { page_size })
    }
}

/// Strip any trailing slash so endpoint paths can be appended verbatim.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/".to_string()),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8000".to_string()),
            "http://localhost:8000"
        );
    }
}
