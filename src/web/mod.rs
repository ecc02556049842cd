// src/web/mod.rs

pub mod handlers;
pub mod types;
pub mod views;

pub use types::*;

use crate::core::{ConfigManager, JobsApiClient, ListingConfig};
use crate::listing::FetchSequencer;
use anyhow::Result;
use handlers::proxy_handlers::ProxyForwarder;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, routes, Request, Response, State};
use std::path::PathBuf;
use tracing::info;

use views::ErrorTemplate;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// Portal pages

#[get("/")]
pub async fn home(client: &State<JobsApiClient>) -> Result<RawHtml<String>, Status> {
    handlers::home_handler(client).await
}

#[get("/jobs?<query..>")]
pub async fn jobs_page(
    query: ListingQuery,
    client: &State<JobsApiClient>,
    config: &State<ListingConfig>,
    sequencer: &State<FetchSequencer>,
) -> Result<RawHtml<String>, Status> {
    handlers::jobs_page_handler(query, client, config, sequencer).await
}

#[get("/jobs/<id>")]
pub async fn job_detail(
    id: i64,
    client: &State<JobsApiClient>,
) -> Result<(Status, RawHtml<String>), Status> {
    handlers::job_detail_handler(id, client).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

// Proxy shim, mounted under /api. GET only; other methods fall through to
// the catchers.

#[get("/<path..>")]
pub async fn proxy_get(
    path: PathBuf,
    query: RawQuery,
    forwarder: &State<ProxyForwarder>,
) -> ProxyResponse {
    let path = path.to_string_lossy().into_owned();
    handlers::proxy_get_handler(path, query, forwarder).await
}

// Error catchers

#[rocket::catch(404)]
pub fn not_found() -> RawHtml<String> {
    let page = ErrorTemplate {
        title: "Page not found".to_string(),
        message: "The page you are looking for does not exist.".to_string(),
        back_href: "/".to_string(),
    };
    RawHtml(
        askama::Template::render(&page).unwrap_or_else(|_| "Page not found".to_string()),
    )
}

#[rocket::catch(404)]
pub fn api_not_found() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": "Not found" }))
}

#[rocket::catch(500)]
pub fn api_internal_error() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": "Internal server error" }))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let api_client = JobsApiClient::new(
        config.backend.base_url.clone(),
        config.backend.timeout_seconds,
    )?;
    let forwarder = ProxyForwarder::new(&config.backend)?;

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", "0.0.0.0"));

    info!("Starting jobs portal server on port {}", config.server.port);
    info!("Job service: {}", config.backend.base_url);

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(api_client)
        .manage(forwarder)
        .manage(FetchSequencer::new())
        .manage(config.listing.clone())
        .register("/", catchers![not_found])
        .register("/api", catchers![api_not_found, api_internal_error])
        .mount("/", routes![home, jobs_page, job_detail, health])
        .mount("/api", routes![proxy_get])
        .launch()
        .await?;

    Ok(())
}
