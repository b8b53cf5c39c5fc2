//! `HevyClient` trait and a reqwest-based client for the Hevy public API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod config;
pub mod http_client;
pub mod model;
pub mod pagination;
pub mod transport;
pub mod utils;

pub use model::{
    Event, EventKind, Exercise, Routine, Set, SetType, Volume, WeightUnit, Workout,
};
pub use pagination::{HevyClientExt, ItemStream};

#[derive(Debug, Error)]
pub enum HevyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decoding {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl HevyError {
    /// HTTP status of a non-success response, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            HevyError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One page of a paginated list endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub page_count: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// The page to request next, or `None` once the last page has been returned.
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.page_count).then(|| self.page + 1)
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.page_count
    }
}

#[async_trait]
pub trait HevyClient: Send + Sync + 'static {
    /// Fetch one page of workouts, newest first. `page_size` is capped at 10.
    async fn get_workouts(&self, page: u32, page_size: u32) -> Result<Page<Workout>, HevyError>;

    /// Fetch a single workout by id.
    async fn get_workout(&self, id: Uuid) -> Result<Workout, HevyError>;

    /// Total number of workouts on the account.
    async fn workout_count(&self) -> Result<u64, HevyError>;

    /// Fetch one page of workout change events that happened after `since`.
    async fn get_workout_events(
        &self,
        page: u32,
        page_size: u32,
        since: DateTime<Utc>,
    ) -> Result<Page<Event>, HevyError>;

    /// Fetch one page of routines. `page_size` is capped at 10.
    async fn get_routines(&self, page: u32, page_size: u32) -> Result<Page<Routine>, HevyError>;
}
