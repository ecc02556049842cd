// src/web/types.rs

use rocket::form::FromForm;
use rocket::http::{ContentType, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::{self, Responder, Response};

use crate::types::{JobFilters, SortKey};

/// Relays an upstream JSON response: status code and body verbatim.
pub struct ProxyResponse {
    pub status: Status,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    pub fn new(status: Status, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Fixed-shape error payload, `{"error": "..."}`.
    pub fn error(status: Status, message: &str) -> Self {
        let body = serde_json::json!({ "error": message });
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ProxyResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(self.body.len(), std::io::Cursor::new(self.body))
            .ok()
    }
}

/// The unparsed query string of the incoming request. The proxy forwards it
/// to the backend without interpreting it.
pub struct RawQuery(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RawQuery {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let query = request.uri().query().map(|q| q.as_str().to_string());
        Outcome::Success(RawQuery(query))
    }
}

/// Query parameters accepted by the listing page. The listing state is
/// initialized from these on every request.
#[derive(Debug, Default, FromForm)]
pub struct ListingQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub sort_by: Option<String>,
}

impl ListingQuery {
    /// Filter set carried by the URL. Empty strings count as "no
    /// constraint", matching how the sidebar form submits cleared fields.
    pub fn filters(&self) -> JobFilters {
        JobFilters {
            category: non_empty(&self.category),
            organization: non_empty(&self.organization),
            location: non_empty(&self.location),
            search: non_empty(&self.search),
            sort_by: self.sort_by.as_deref().and_then(SortKey::parse),
        }
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_mean_no_constraint() {
        let query = ListingQuery {
            search: Some("".to_string()),
            category: Some("  ".to_string()),
            ..Default::default()
        };

        let filters = query.filters();
        assert!(filters.is_empty());
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_filters_built_from_query() {
        let query = ListingQuery {
            page: Some(4),
            search: Some("clerk".to_string()),
            category: Some("result".to_string()),
            sort_by: Some("title".to_string()),
            ..Default::default()
        };

        let filters = query.filters();
        assert_eq!(filters.search.as_deref(), Some("clerk"));
        assert_eq!(filters.category.as_deref(), Some("result"));
        assert_eq!(filters.sort_by, Some(SortKey::Title));
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn test_unknown_sort_key_ignored() {
        let query = ListingQuery {
            sort_by: Some("salary".to_string()),
            ..Default::default()
        };
        assert_eq!(query.filters().sort_by, None);
    }

    #[test]
    fn test_page_zero_becomes_one() {
        let query = ListingQuery {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_proxy_error_payload_shape() {
        let response = ProxyResponse::error(Status::InternalServerError, "Failed to fetch");
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["error"], "Failed to fetch");
        assert_eq!(response.status, Status::InternalServerError);
    }
}
