// src/web/handlers/page_handlers.rs
//! Handlers for the server-rendered portal pages

use askama::Template;
use chrono::Utc;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::core::{JobNotFound, JobsApiClient, ListingConfig};
use crate::listing::{reduce, FetchSequencer, ListingAction, ListingSnapshot};
use crate::web::types::ListingQuery;
use crate::web::views::{
    cards_for, ErrorTemplate, HomeTemplate, JobDetailView, JobTemplate, JobsTemplate,
};

const LIST_FETCH_ERROR: &str = "Failed to fetch jobs. Please try again.";

fn render<T: Template>(template: T) -> Result<RawHtml<String>, Status> {
    match template.render() {
        Ok(html) => Ok(RawHtml(html)),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            Err(Status::InternalServerError)
        }
    }
}

/// Home page: the four server-side slices are fetched concurrently and
/// joined before rendering. Each slice degrades to an empty section.
pub async fn home_handler(client: &State<JobsApiClient>) -> Result<RawHtml<String>, Status> {
    let (latest, upcoming, admit_cards, results) = tokio::join!(
        client.latest_jobs(),
        client.upcoming_dates(),
        client.admit_cards(),
        client.results(),
    );

    let today = Utc::now().date_naive();

    render(HomeTemplate {
        latest: cards_for(&latest, today),
        upcoming: cards_for(&upcoming, today),
        admit_cards: cards_for(&admit_cards, today),
        results: cards_for(&results, today),
    })
}

/// Listing page. State initializes from the URL query, the fetch is tagged
/// through the sequencer, and only the tagged outcome commits to the
/// snapshot that gets rendered.
pub async fn jobs_page_handler(
    query: ListingQuery,
    client: &State<JobsApiClient>,
    config: &State<ListingConfig>,
    sequencer: &State<FetchSequencer>,
) -> Result<RawHtml<String>, Status> {
    let snapshot = ListingSnapshot::new(query.filters(), query.page(), config.page_size);

    let seq = sequencer.next();
    let snapshot = reduce(&snapshot, ListingAction::FetchStarted { seq });

    let (list_result, categories, organizations, locations) = tokio::join!(
        client.list_jobs(snapshot.page, snapshot.page_size, &snapshot.filters),
        client.categories(),
        client.organizations(),
        client.locations(),
    );

    let snapshot = match list_result {
        Ok(page) => reduce(
            &snapshot,
            ListingAction::ResultsLoaded {
                seq,
                jobs: page.jobs,
                total: page.total,
            },
        ),
        Err(e) => {
            error!("Failed to fetch jobs: {:#}", e);
            reduce(
                &snapshot,
                ListingAction::LoadFailed {
                    seq,
                    message: LIST_FETCH_ERROR.to_string(),
                },
            )
        }
    };

    let template = JobsTemplate::from_snapshot(
        &snapshot,
        &categories,
        &organizations,
        &locations,
        Utc::now().date_naive(),
    );

    render(template)
}

/// Detail page. A backend 404 renders the not-found state; other failures
/// render the generic error state.
pub async fn job_detail_handler(
    id: i64,
    client: &State<JobsApiClient>,
) -> Result<(Status, RawHtml<String>), Status> {
    match client.job_by_id(id).await {
        Ok(job) => {
            let template = JobTemplate {
                job: JobDetailView::from_job(&job),
            };
            Ok((Status::Ok, render(template)?))
        }
        Err(e) if e.downcast_ref::<JobNotFound>().is_some() => {
            warn!("Job {} not found", id);
            Ok((Status::NotFound, render(ErrorTemplate::job_not_found())?))
        }
        Err(e) => {
            error!("Failed to fetch job {}: {:#}", id, e);
            Ok((
                Status::InternalServerError,
                render(ErrorTemplate::job_load_failed())?,
            ))
        }
    }
}

pub async fn health_handler() -> Json<&'static str> {
    info!("Health check");
    Json("OK")
}
