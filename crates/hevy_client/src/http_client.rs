//! HTTP client implementation for the Hevy API.
//!
//! This module provides a reqwest-based implementation of the [`HevyClient`](crate::HevyClient) trait.

use crate::config::Config;
use crate::transport::{ApiHeaders, ApiHeadersLayer};
use crate::utils::{clamp_page_size, format_timestamp};
use crate::{Event, HevyClient, HevyError, Page, Routine, Workout};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use reqwest::{Method, Url};
use secrecy::SecretString;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tower::{ServiceBuilder, ServiceExt};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Deserialize)]
struct WorkoutsEnvelope {
    page: u32,
    page_count: u32,
    workouts: Vec<Workout>,
}

#[derive(Deserialize)]
struct WorkoutCountEnvelope {
    workout_count: u64,
}

#[derive(Deserialize)]
struct EventsEnvelope {
    page: u32,
    page_count: u32,
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct RoutinesEnvelope {
    page: u32,
    page_count: u32,
    routines: Vec<Routine>,
}

/// Client for the Hevy API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestHevyClient {
    base_url: String,
    api_version: String,
    service: ApiHeaders<reqwest::Client>,
}

impl ReqwestHevyClient {
    /// Create a client for the production API with default settings.
    pub fn new(api_key: SecretString) -> Result<Self, HevyError> {
        Self::from_config(&Config::new(api_key))
    }

    /// Create a client from a full configuration.
    ///
    /// The underlying reqwest client gets the configured per-request timeout
    /// and is wrapped in [`ApiHeadersLayer`] so every request is authenticated.
    pub fn from_config(config: &Config) -> Result<Self, HevyError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let service = ServiceBuilder::new()
            .layer(ApiHeadersLayer::new(&config.api_key, &config.user_agent)?)
            .service(http);
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
            service,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join base URL, API version, resource path and query parameters into a
    /// request URL: `{base}/{version}/{path}?{query}`.
    pub fn construct_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, HevyError> {
        let raw = format!("{}/{}/{}", self.base_url, self.api_version, path);
        let mut url =
            Url::parse(&raw).map_err(|e| HevyError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn page_query(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("page", page.to_string()),
            ("pageSize", clamp_page_size(page_size).to_string()),
        ]
    }

    /// Send a GET through the header layer and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, HevyError> {
        let path = url.path().to_owned();
        debug!(%path, query = url.query().unwrap_or_default(), "hevy: GET");
        counter!("hevy_client_requests_total").increment(1);

        let request = reqwest::Request::new(Method::GET, url);
        let resp = self
            .service
            .clone()
            .oneshot(request)
            .await
            .inspect_err(|_| counter!("hevy_client_errors_total", "kind" => "http").increment(1))?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(&path, resp).await);
        }

        // Read body as text first so decode errors can show what came back.
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            counter!("hevy_client_errors_total", "kind" => "decode").increment(1);
            let body_snippet: String = text.chars().take(512).collect();
            HevyError::Decode {
                context: format!("{path} - body: {body_snippet}"),
                source: e,
            }
        })
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, path: &str, resp: reqwest::Response) -> HevyError {
        let status = resp.status().as_u16();
        counter!("hevy_client_errors_total", "kind" => "status").increment(1);
        warn!(%path, status, "hevy: request failed");
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        HevyError::Status {
            status,
            body: body_snippet,
        }
    }
}

#[async_trait]
impl HevyClient for ReqwestHevyClient {
    async fn get_workouts(&self, page: u32, page_size: u32) -> Result<Page<Workout>, HevyError> {
        let url = self.construct_url("workouts", &Self::page_query(page, page_size))?;
        let envelope: WorkoutsEnvelope = self.get_json(url).await?;
        Ok(Page {
            page: envelope.page,
            page_count: envelope.page_count,
            items: envelope.workouts,
        })
    }

    async fn get_workout(&self, id: Uuid) -> Result<Workout, HevyError> {
        let url = self.construct_url(&format!("workouts/{id}"), &[])?;
        self.get_json(url).await
    }

    async fn workout_count(&self) -> Result<u64, HevyError> {
        let url = self.construct_url("workouts/count", &[])?;
        let envelope: WorkoutCountEnvelope = self.get_json(url).await?;
        Ok(envelope.workout_count)
    }

    async fn get_workout_events(
        &self,
        page: u32,
        page_size: u32,
        since: DateTime<Utc>,
    ) -> Result<Page<Event>, HevyError> {
        let mut query = Self::page_query(page, page_size);
        query.push(("since", format_timestamp(since)));
        let url = self.construct_url("workouts/events", &query)?;
        let envelope: EventsEnvelope = self.get_json(url).await?;
        Ok(Page {
            page: envelope.page,
            page_count: envelope.page_count,
            items: envelope.events,
        })
    }

    async fn get_routines(&self, page: u32, page_size: u32) -> Result<Page<Routine>, HevyError> {
        let url = self.construct_url("routines", &Self::page_query(page, page_size))?;
        let envelope: RoutinesEnvelope = self.get_json(url).await?;
        Ok(Page {
            page: envelope.page,
            page_count: envelope.page_count,
            items: envelope.routines,
        })
    }
}
