// src/core/api_client.rs
//! Typed HTTP client for the backend job service

use anyhow::{Context, Result};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

use crate::types::{Job, JobCountStats, JobFilters, JobPage};

// The collection endpoint requires a trailing slash; nested paths must not
// have one.
const JOBS_ENDPOINT: &str = "/jobs/";
const STATS_COUNT_ENDPOINT: &str = "/jobs/stats/count";
const CATEGORIES_ENDPOINT: &str = "/jobs/categories";
const ORGANIZATIONS_ENDPOINT: &str = "/jobs/organizations";
const LOCATIONS_ENDPOINT: &str = "/jobs/locations";
const LATEST_ENDPOINT: &str = "/jobs/latest";
const UPCOMING_DATES_ENDPOINT: &str = "/jobs/upcoming-dates";
const ADMIT_CARDS_ENDPOINT: &str = "/jobs/admit-cards";
const RESULTS_ENDPOINT: &str = "/jobs/results";

/// Fallback shown when the categories endpoint is unavailable.
const CATEGORY_FALLBACK: &[&str] = &["job", "admit_card", "result"];

/// Marker error for a job id the backend does not know. Callers downcast to
/// tell "missing" apart from transport or server failures.
#[derive(Debug)]
pub struct JobNotFound(pub i64);

impl fmt::Display for JobNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job {} not found", self.0)
    }
}

impl std::error::Error for JobNotFound {}

pub struct JobsApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobsApiClient {
    /// Create new client with a request timeout applied to every call.
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One page of jobs matching `filters`, composed with the total count
    /// from the stats endpoint.
    pub async fn list_jobs(
        &self,
        page: usize,
        page_size: usize,
        filters: &JobFilters,
    ) -> Result<JobPage> {
        let params = list_query_params(page, page_size, filters);
        let url = format!("{}{}", self.base_url, JOBS_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to call job listing endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Job service returned status {}: {}", status, error_text);
        }

        let jobs: Vec<Job> = response
            .json()
            .await
            .context("Failed to parse job listing response")?;

        // Total count lives on a separate stats endpoint.
        let total = self.job_count().await?;

        Ok(JobPage {
            jobs,
            total,
            page,
            limit: page_size,
        })
    }

    /// Fetch one job by id. A backend 404 surfaces as [`JobNotFound`].
    pub async fn job_by_id(&self, id: i64) -> Result<Job> {
        let url = format!("{}/jobs/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call job detail endpoint")?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::Error::new(JobNotFound(id)));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Job service returned status {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse job detail response")
    }

    async fn job_count(&self) -> Result<u64> {
        let url = format!("{}{}", self.base_url, STATS_COUNT_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call job count endpoint")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Job count endpoint returned status {}", status);
        }

        let stats: JobCountStats = response
            .json()
            .await
            .context("Failed to parse job count response")?;

        Ok(stats.total_jobs)
    }

    /// Distinct categories for the filter sidebar. Degrades to a hardcoded
    /// fallback so the sidebar keeps working when the endpoint is down.
    pub async fn categories(&self) -> Vec<String> {
        match self.fetch_strings(CATEGORIES_ENDPOINT).await {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to fetch categories, using fallback: {:#}", e);
                CATEGORY_FALLBACK.iter().map(|s| s.to_string()).collect()
            }
        }
    }

    /// Distinct organizations for the filter sidebar; empty on failure.
    pub async fn organizations(&self) -> Vec<String> {
        match self.fetch_strings(ORGANIZATIONS_ENDPOINT).await {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to fetch organizations: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Distinct locations for the filter sidebar; empty on failure.
    pub async fn locations(&self) -> Vec<String> {
        match self.fetch_strings(LOCATIONS_ENDPOINT).await {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to fetch locations: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Most recently posted jobs (server-side slice).
    pub async fn latest_jobs(&self) -> Vec<Job> {
        self.fetch_slice(LATEST_ENDPOINT).await
    }

    /// Jobs with application deadlines coming up soon.
    pub async fn upcoming_dates(&self) -> Vec<Job> {
        self.fetch_slice(UPCOMING_DATES_ENDPOINT).await
    }

    /// Admit-card announcements.
    pub async fn admit_cards(&self) -> Vec<Job> {
        self.fetch_slice(ADMIT_CARDS_ENDPOINT).await
    }

    /// Exam result announcements.
    pub async fn results(&self) -> Vec<Job> {
        self.fetch_slice(RESULTS_ENDPOINT).await
    }

    /// Slice endpoints feed home-page sections; a failure renders as an
    /// empty section, never an error page.
    async fn fetch_slice(&self, endpoint: &str) -> Vec<Job> {
        match self.get_json::<Vec<Job>>(endpoint).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Failed to fetch slice {}: {:#}", endpoint, e);
                Vec::new()
            }
        }
    }

    async fn fetch_strings(&self, endpoint: &str) -> Result<Vec<String>> {
        self.get_json::<Vec<String>>(endpoint).await
    }

    async fn get_json<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        info!("Calling job service: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}

/// Derive the `GET jobs/` query parameters from the page cursor and filter
/// set. Unset filter fields emit no parameter at all.
pub fn list_query_params(
    page: usize,
    page_size: usize,
    filters: &JobFilters,
) -> Vec<(&'static str, String)> {
    let skip = page.saturating_sub(1) * page_size;

    let mut params = vec![("skip", skip.to_string()), ("limit", page_size.to_string())];

    if let Some(search) = &filters.search {
        params.push(("search", search.clone()));
    }
    if let Some(category) = &filters.category {
        params.push(("category", category.clone()));
    }
    if let Some(organization) = &filters.organization {
        params.push(("organization", organization.clone()));
    }
    if let Some(location) = &filters.location {
        params.push(("location", location.clone()));
    }
    if let Some(sort_by) = filters.sort_by {
        params.push(("sort_by", sort_by.as_str().to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortKey;

    #[test]
    fn test_list_params_pagination_only() {
        let params = list_query_params(3, 20, &JobFilters::default());
        assert_eq!(
            params,
            vec![("skip", "40".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn test_list_params_first_page_skips_nothing() {
        let params = list_query_params(1, 20, &JobFilters::default());
        assert_eq!(params[0], ("skip", "0".to_string()));
    }

    #[test]
    fn test_list_params_include_set_filters() {
        let filters = JobFilters::default()
            .with_category(Some("result".to_string()))
            .with_search(Some("railway clerk".to_string()))
            .with_sort_by(Some(SortKey::Title));

        let params = list_query_params(1, 20, &filters);

        assert!(params.contains(&("search", "railway clerk".to_string())));
        assert!(params.contains(&("category", "result".to_string())));
        assert!(params.contains(&("sort_by", "title".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "organization"));
        assert!(!params.iter().any(|(k, _)| *k == "location"));
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let params = list_query_params(0, 20, &JobFilters::default());
        assert_eq!(params[0], ("skip", "0".to_string()));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = JobsApiClient::new("http://localhost:8000/".to_string(), 10).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
