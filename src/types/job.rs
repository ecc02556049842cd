// src/types/job.rs
//! Wire types for the backend job service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single job posting as returned by the backend.
///
/// Immutable once fetched; handlers own it transiently and drop it after
/// rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub organization: String,
    pub job_url: String,
    pub description: String,
    pub posting_date: NaiveDate,
    pub last_date: NaiveDate,
    pub exam_date: Option<NaiveDate>,
    pub location: String,
    pub category: String,
    pub posts: Option<u32>,
    pub salary: Option<String>,
    pub qualification: String,
    pub feed_source: String,
}

/// Sort order accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Recent,
    Title,
    Organization,
}

impl SortKey {
    /// Wire value used in `sort_by` query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Title => "title",
            SortKey::Organization => "organization",
        }
    }

    /// Lenient parse from a query-string value. Unknown values mean
    /// "no explicit sort" rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "recent" => Some(SortKey::Recent),
            "title" => Some(SortKey::Title),
            "organization" => Some(SortKey::Organization),
            _ => None,
        }
    }
}

/// User-chosen constraints narrowing the job list. All fields optional;
/// `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    pub category: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.organization.is_none()
            && self.location.is_none()
            && self.search.is_none()
            && self.sort_by.is_none()
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_sort_by(mut self, sort_by: Option<SortKey>) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// One page of listing results composed from `GET jobs/` plus
/// `GET jobs/stats/count`.
#[derive(Debug, Clone, Serialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: u64,
    pub page: usize,
    pub limit: usize,
}

/// Wire shape of `GET jobs/stats/count`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobCountStats {
    pub total_jobs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_round_trip() {
        assert_eq!(SortKey::parse("recent"), Some(SortKey::Recent));
        assert_eq!(SortKey::parse("Title"), Some(SortKey::Title));
        assert_eq!(SortKey::parse("organization"), Some(SortKey::Organization));
        assert_eq!(SortKey::parse("salary"), None);
        assert_eq!(SortKey::Recent.as_str(), "recent");
    }

    #[test]
    fn test_filters_default_is_empty() {
        assert!(JobFilters::default().is_empty());
        assert!(!JobFilters::default()
            .with_category(Some("result".to_string()))
            .is_empty());
    }

    #[test]
    fn test_job_deserializes_with_nulls() {
        let raw = r#"{
            "id": 7,
            "title": "Junior Engineer",
            "organization": "Railway Board",
            "job_url": "https://example.org/jobs/7",
            "description": "desc",
            "posting_date": "2024-05-01",
            "last_date": "2024-06-15",
            "exam_date": null,
            "location": "Delhi",
            "category": "job",
            "posts": null,
            "salary": null,
            "qualification": "Diploma",
            "feed_source": "rss"
        }"#;

        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.exam_date, None);
        assert_eq!(job.posts, None);
        assert_eq!(job.last_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }
}
