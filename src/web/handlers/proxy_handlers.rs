// src/web/handlers/proxy_handlers.rs
//! GET-only proxy forwarding browser API calls to the backend job service

use anyhow::{Context, Result};
use rocket::http::Status;
use rocket::State;
use std::time::Duration;
use tracing::{error, info};

use crate::core::BackendConfig;
use crate::web::types::{ProxyResponse, RawQuery};

/// Forwards inbound requests to the backend host. Holds its own client so
/// proxy timeouts track the backend config.
pub struct ProxyForwarder {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyForwarder {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create proxy HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Backend URL for an inbound path, query string appended verbatim.
    pub fn forward_url(&self, path: &str, query: Option<&str>) -> String {
        let backend_path = rewrite_backend_path(path);
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, backend_path, q),
            _ => format!("{}/{}", self.base_url, backend_path),
        }
    }
}

/// The backend wants a trailing slash on the bare jobs collection endpoint
/// but not on nested paths.
pub fn rewrite_backend_path(path: &str) -> String {
    if path == "jobs" {
        "jobs/".to_string()
    } else {
        path.to_string()
    }
}

pub async fn proxy_get_handler(
    path: String,
    query: RawQuery,
    forwarder: &State<ProxyForwarder>,
) -> ProxyResponse {
    let url = forwarder.forward_url(&path, query.0.as_deref());

    info!("Proxying request: {}", url);

    let response = match forwarder.client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Proxy fetch failed for {}: {:#}", url, e);
            return ProxyResponse::error(Status::InternalServerError, "Failed to fetch");
        }
    };

    let status = response.status();
    if !status.is_success() {
        let relay = Status::from_code(status.as_u16()).unwrap_or(Status::BadGateway);
        return ProxyResponse::error(relay, &format!("Backend returned {}", status.as_u16()));
    }

    match response.bytes().await {
        Ok(body) => {
            let relay = Status::from_code(status.as_u16()).unwrap_or(Status::Ok);
            ProxyResponse::new(relay, body.to_vec())
        }
        Err(e) => {
            error!("Proxy failed to read backend body: {:#}", e);
            ProxyResponse::error(Status::InternalServerError, "Failed to fetch")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarder() -> ProxyForwarder {
        ProxyForwarder::new(&BackendConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_bare_jobs_path_gains_trailing_slash() {
        assert_eq!(rewrite_backend_path("jobs"), "jobs/");
    }

    #[test]
    fn test_nested_paths_pass_through_unmodified() {
        assert_eq!(rewrite_backend_path("jobs/stats/count"), "jobs/stats/count");
        assert_eq!(rewrite_backend_path("jobs/latest"), "jobs/latest");
        assert_eq!(rewrite_backend_path("jobs/17"), "jobs/17");
    }

    #[test]
    fn test_forward_url_appends_query_verbatim() {
        let url = forwarder().forward_url("jobs", Some("skip=20&limit=20&category=job"));
        assert_eq!(
            url,
            "http://localhost:8000/jobs/?skip=20&limit=20&category=job"
        );
    }

    #[test]
    fn test_forward_url_without_query() {
        let url = forwarder().forward_url("jobs/stats/count", None);
        assert_eq!(url, "http://localhost:8000/jobs/stats/count");
    }

    #[test]
    fn test_forward_url_empty_query_ignored() {
        let url = forwarder().forward_url("jobs/latest", Some(""));
        assert_eq!(url, "http://localhost:8000/jobs/latest");
    }
}
