//! Server-rendered portal over a remote job-listing service: fetches
//! paginated, filterable job records and renders home, list, and detail
//! views, plus a proxy shim for browser-originated API calls.

pub mod core;
pub mod listing;
pub mod types;
pub mod web;

pub use crate::core::{ConfigManager, JobsApiClient};
pub use web::start_web_server;
