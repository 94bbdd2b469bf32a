pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod view;

pub use client::{FetchResult, SchedulerClient};
pub use error::SummaryError;
pub use view::{SummaryViewModel, ViewState};
