// src/listing.rs
//! Listing state: immutable snapshots, a single reducer, and fetch
//! sequencing so only the newest response commits.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Job, JobFilters};

/// Outcome of the most recent committed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

/// One immutable view of the listing: the active filter set, the page
/// cursor, and the last committed results.
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    pub filters: JobFilters,
    pub page: usize,
    pub page_size: usize,
    pub total: u64,
    pub jobs: Vec<Job>,
    pub phase: LoadPhase,
    /// Tag of the fetch currently allowed to commit. Anything else is stale.
    pending_seq: Option<u64>,
}

/// State transitions. Snapshots never mutate; [`reduce`] maps an action to
/// the next snapshot.
#[derive(Debug)]
pub enum ListingAction {
    /// The complete new filter set (the sidebar form submits every field).
    FiltersChanged(JobFilters),
    PageChanged(usize),
    FetchStarted { seq: u64 },
    ResultsLoaded { seq: u64, jobs: Vec<Job>, total: u64 },
    LoadFailed { seq: u64, message: String },
}

impl ListingSnapshot {
    pub fn new(filters: JobFilters, page: usize, page_size: usize) -> Self {
        Self {
            filters,
            page: page.max(1),
            page_size,
            total: 0,
            jobs: Vec::new(),
            phase: LoadPhase::Loading,
            pending_seq: None,
        }
    }

    /// Number of pages the current total spans.
    pub fn total_pages(&self) -> usize {
        (self.total as usize).div_ceil(self.page_size)
    }

    /// Pages as shown to the user; a zero-result listing still renders
    /// "Page 1 of 1".
    pub fn display_total_pages(&self) -> usize {
        self.total_pages().max(1)
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.display_total_pages())
    }
}

/// The single update function. Filter changes reset the cursor to page 1;
/// page changes clamp to the known range; fetch outcomes commit only when
/// their tag is still the pending one.
pub fn reduce(snapshot: &ListingSnapshot, action: ListingAction) -> ListingSnapshot {
    let mut next = snapshot.clone();

    match action {
        ListingAction::FiltersChanged(filters) => {
            next.filters = filters;
            next.page = 1;
        }
        ListingAction::PageChanged(page) => {
            next.page = snapshot.clamp_page(page);
        }
        ListingAction::FetchStarted { seq } => {
            next.pending_seq = Some(seq);
            next.phase = LoadPhase::Loading;
        }
        ListingAction::ResultsLoaded { seq, jobs, total } => {
            if snapshot.pending_seq == Some(seq) {
                next.jobs = jobs;
                next.total = total;
                next.phase = LoadPhase::Ready;
                next.pending_seq = None;
            }
        }
        ListingAction::LoadFailed { seq, message } => {
            if snapshot.pending_seq == Some(seq) {
                next.jobs = Vec::new();
                next.total = 0;
                next.phase = LoadPhase::Failed(message);
                next.pending_seq = None;
            }
        }
    }

    next
}

/// Hands out monotonically increasing fetch tags. The newest tag wins;
/// responses carrying an older tag are discarded by the reducer.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    counter: AtomicU64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}
