// src/web/views.rs
//! View models and askama templates for the portal pages

use askama::Template;
use chrono::NaiveDate;

use crate::listing::{ListingSnapshot, LoadPhase};
use crate::types::{Job, JobFilters, SortKey};

const DATE_FORMAT: &str = "%b %d, %Y";

/// Deadlines this close get the "Hot" badge.
const HOT_WINDOW_DAYS: i64 = 7;

/// Pages shown on either side of the current one.
const PAGE_WINDOW: usize = 3;

// ==================== View models ====================

/// One job card in a grid. Everything the template needs, precomputed.
#[derive(Debug, Clone)]
pub struct JobCard {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub category: String,
    pub posts_label: String,
    pub last_date_label: String,
    pub days_left_label: String,
    pub is_hot: bool,
    pub href: String,
}

impl JobCard {
    pub fn from_job(job: &Job, today: NaiveDate) -> Self {
        let days_left = days_until(today, job.last_date);
        let is_hot = deadline_is_hot(days_left);

        Self {
            title: job.title.clone(),
            organization: job.organization.clone(),
            location: job.location.clone(),
            category: job.category.clone(),
            posts_label: job
                .posts
                .map(|n| format!("{} posts", n))
                .unwrap_or_default(),
            last_date_label: job.last_date.format(DATE_FORMAT).to_string(),
            days_left_label: if is_hot {
                format!("{} days left", days_left)
            } else {
                String::new()
            },
            is_hot,
            href: format!("/jobs/{}", job.id),
        }
    }
}

pub fn cards_for(jobs: &[Job], today: NaiveDate) -> Vec<JobCard> {
    jobs.iter().map(|job| JobCard::from_job(job, today)).collect()
}

/// Full detail view of a single job.
#[derive(Debug, Clone)]
pub struct JobDetailView {
    pub title: String,
    pub organization: String,
    pub apply_url: String,
    pub location: String,
    pub category: String,
    pub posts_label: String,
    pub salary: String,
    pub description: String,
    pub qualification: String,
    pub posted_label: String,
    pub last_date_label: String,
    pub exam_date_label: String,
    pub feed_source: String,
}

impl JobDetailView {
    pub fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            organization: job.organization.clone(),
            apply_url: job.job_url.clone(),
            location: job.location.clone(),
            category: job.category.clone(),
            posts_label: job.posts.map(|n| n.to_string()).unwrap_or_default(),
            salary: job.salary.clone().unwrap_or_default(),
            description: job.description.clone(),
            qualification: job.qualification.clone(),
            posted_label: job.posting_date.format(DATE_FORMAT).to_string(),
            last_date_label: job.last_date.format(DATE_FORMAT).to_string(),
            exam_date_label: job
                .exam_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            feed_source: job.feed_source.clone(),
        }
    }
}

/// A `<select>` option with its selection state resolved.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

fn select_options(values: &[String], selected: Option<&str>) -> Vec<SelectOption> {
    values
        .iter()
        .map(|value| SelectOption {
            value: value.clone(),
            label: value.clone(),
            selected: Some(value.as_str()) == selected,
        })
        .collect()
}

/// The filter sidebar: current values plus the option lists that populate
/// the selects.
#[derive(Debug, Clone)]
pub struct FilterSidebar {
    pub search_value: String,
    pub categories: Vec<SelectOption>,
    pub organizations: Vec<SelectOption>,
    pub locations: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    pub clear_href: String,
}

impl FilterSidebar {
    pub fn build(
        filters: &JobFilters,
        categories: &[String],
        organizations: &[String],
        locations: &[String],
    ) -> Self {
        let sort_values = [SortKey::Recent, SortKey::Title, SortKey::Organization];
        let sorts = sort_values
            .iter()
            .map(|key| SelectOption {
                value: key.as_str().to_string(),
                label: key.as_str().to_string(),
                selected: filters.sort_by == Some(*key),
            })
            .collect();

        Self {
            search_value: filters.search.clone().unwrap_or_default(),
            categories: select_options(categories, filters.category.as_deref()),
            organizations: select_options(organizations, filters.organization.as_deref()),
            locations: select_options(locations, filters.location.as_deref()),
            sorts,
            clear_href: "/jobs".to_string(),
        }
    }
}

/// Numbered pagination link.
#[derive(Debug, Clone)]
pub struct PageLink {
    pub n: usize,
    pub href: String,
    pub is_current: bool,
}

// ==================== Templates ====================

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub latest: Vec<JobCard>,
    pub upcoming: Vec<JobCard>,
    pub admit_cards: Vec<JobCard>,
    pub results: Vec<JobCard>,
}

#[derive(Template)]
#[template(path = "jobs.html")]
pub struct JobsTemplate {
    pub sidebar: FilterSidebar,
    pub cards: Vec<JobCard>,
    pub shown: usize,
    pub total: u64,
    pub current_page: usize,
    pub total_pages: usize,
    pub pages: Vec<PageLink>,
    pub prev_href: String,
    pub next_href: String,
    pub has_prev: bool,
    pub has_next: bool,
    pub error: String,
}

impl JobsTemplate {
    /// Assemble the listing page from a committed snapshot plus the filter
    /// option lists.
    pub fn from_snapshot(
        snapshot: &ListingSnapshot,
        categories: &[String],
        organizations: &[String],
        locations: &[String],
        today: NaiveDate,
    ) -> Self {
        let total_pages = snapshot.display_total_pages();
        let current_page = snapshot.page;

        let pages = page_window(current_page, total_pages)
            .into_iter()
            .map(|n| PageLink {
                n,
                href: listing_href(&snapshot.filters, n),
                is_current: n == current_page,
            })
            .collect();

        let error = match &snapshot.phase {
            LoadPhase::Failed(message) => message.clone(),
            _ => String::new(),
        };

        Self {
            sidebar: FilterSidebar::build(&snapshot.filters, categories, organizations, locations),
            cards: cards_for(&snapshot.jobs, today),
            shown: snapshot.jobs.len(),
            total: snapshot.total,
            current_page,
            total_pages,
            pages,
            prev_href: listing_href(&snapshot.filters, current_page.saturating_sub(1).max(1)),
            next_href: listing_href(&snapshot.filters, (current_page + 1).min(total_pages)),
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "job.html")]
pub struct JobTemplate {
    pub job: JobDetailView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub back_href: String,
}

impl ErrorTemplate {
    pub fn job_not_found() -> Self {
        Self {
            title: "Job not found".to_string(),
            message: "This job listing does not exist or has been removed.".to_string(),
            back_href: "/jobs".to_string(),
        }
    }

    pub fn job_load_failed() -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: "Failed to load job details. Please try again.".to_string(),
            back_href: "/jobs".to_string(),
        }
    }
}

// ==================== Helpers ====================

/// Whole days between today and a deadline; negative once it has passed.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn deadline_is_hot(days_left: i64) -> bool {
    days_left > 0 && days_left <= HOT_WINDOW_DAYS
}

/// The numbered window around the current page, current +/- 3 clamped to
/// the valid range.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let start = current.saturating_sub(PAGE_WINDOW).max(1);
    let end = (current + PAGE_WINDOW).min(total_pages.max(1));
    (start..=end).collect()
}

/// Listing URL carrying the given page plus every set filter field,
/// URL-encoded.
pub fn listing_href(filters: &JobFilters, page: usize) -> String {
    let mut href = format!("/jobs?page={}", page);

    let mut push = |key: &str, value: &str| {
        href.push('&');
        href.push_str(key);
        href.push('=');
        href.push_str(&urlencoding::encode(value));
    };

    if let Some(search) = &filters.search {
        push("search", search);
    }
    if let Some(category) = &filters.category {
        push("category", category);
    }
    if let Some(organization) = &filters.organization {
        push("organization", organization);
    }
    if let Some(location) = &filters.location {
        push("location", location);
    }
    if let Some(sort_by) = filters.sort_by {
        push("sort_by", sort_by.as_str());
    }

    href
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{reduce, ListingAction, ListingSnapshot};

    fn job_due_in(days: i64) -> Job {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Job {
            id: 42,
            title: "Assistant Section Officer".to_string(),
            organization: "UPSC".to_string(),
            job_url: "https://example.org/jobs/42".to_string(),
            description: "desc".to_string(),
            posting_date: today,
            last_date: today + chrono::Duration::days(days),
            exam_date: None,
            location: "Mumbai".to_string(),
            category: "job".to_string(),
            posts: None,
            salary: None,
            qualification: "Graduate".to_string(),
            feed_source: "rss".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_deadline_five_days_out_is_hot() {
        let card = JobCard::from_job(&job_due_in(5), today());
        assert!(card.is_hot);
        assert_eq!(card.days_left_label, "5 days left");
    }

    #[test]
    fn test_deadline_ten_days_out_is_not_hot() {
        let card = JobCard::from_job(&job_due_in(10), today());
        assert!(!card.is_hot);
        assert!(card.days_left_label.is_empty());
    }

    #[test]
    fn test_past_deadline_is_not_hot() {
        let card = JobCard::from_job(&job_due_in(-2), today());
        assert!(!card.is_hot);
    }

    #[test]
    fn test_page_window_clamps() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(5, 20), vec![2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(page_window(20, 20), vec![17, 18, 19, 20]);
        assert_eq!(page_window(1, 0), vec![1]);
    }

    #[test]
    fn test_listing_href_preserves_filters() {
        let filters = JobFilters::default()
            .with_search(Some("railway clerk".to_string()))
            .with_category(Some("job".to_string()));

        let href = listing_href(&filters, 2);
        assert_eq!(href, "/jobs?page=2&search=railway%20clerk&category=job");
    }

    #[test]
    fn test_listing_href_without_filters() {
        assert_eq!(listing_href(&JobFilters::default(), 1), "/jobs?page=1");
    }

    #[test]
    fn test_sidebar_marks_selected_option() {
        let filters = JobFilters::default().with_category(Some("result".to_string()));
        let sidebar = FilterSidebar::build(
            &filters,
            &["job".to_string(), "result".to_string()],
            &[],
            &[],
        );

        assert!(!sidebar.categories[0].selected);
        assert!(sidebar.categories[1].selected);
    }

    #[test]
    fn test_empty_listing_renders_no_jobs_state() {
        let snapshot = ListingSnapshot::new(
            JobFilters::default().with_category(Some("result".to_string())),
            1,
            20,
        );
        let snapshot = reduce(&snapshot, ListingAction::FetchStarted { seq: 1 });
        let snapshot = reduce(
            &snapshot,
            ListingAction::ResultsLoaded {
                seq: 1,
                jobs: vec![],
                total: 0,
            },
        );

        let template = JobsTemplate::from_snapshot(&snapshot, &[], &[], &[], today());
        assert_eq!(template.shown, 0);
        assert_eq!(template.total, 0);
        assert!(template.error.is_empty());
        assert_eq!(template.total_pages, 1);
    }

    #[test]
    fn test_failed_listing_renders_error_banner() {
        let snapshot = ListingSnapshot::new(JobFilters::default(), 1, 20);
        let snapshot = reduce(&snapshot, ListingAction::FetchStarted { seq: 1 });
        let snapshot = reduce(
            &snapshot,
            ListingAction::LoadFailed {
                seq: 1,
                message: "Failed to fetch jobs. Please try again.".to_string(),
            },
        );

        let template = JobsTemplate::from_snapshot(&snapshot, &[], &[], &[], today());
        assert_eq!(template.error, "Failed to fetch jobs. Please try again.");
        assert!(template.cards.is_empty());
    }

    #[test]
    fn test_pagination_hrefs_stay_in_range() {
        let snapshot = ListingSnapshot::new(JobFilters::default(), 1, 20);
        let snapshot = reduce(&snapshot, ListingAction::FetchStarted { seq: 1 });
        let snapshot = reduce(
            &snapshot,
            ListingAction::ResultsLoaded {
                seq: 1,
                jobs: vec![],
                total: 45,
            },
        );

        let template = JobsTemplate::from_snapshot(&snapshot, &[], &[], &[], today());
        assert_eq!(template.total_pages, 3);
        assert!(!template.has_prev);
        assert!(template.has_next);
        assert_eq!(template.prev_href, "/jobs?page=1");
        assert_eq!(template.next_href, "/jobs?page=2");
    }
}
