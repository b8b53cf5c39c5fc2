//! Aggregators over the paged list endpoints.
//!
//! Every paginated resource can be consumed three ways:
//!
//! - **eager**: `all_*` fetches every page and returns one `Vec`, or the first
//!   error (partial results are discarded);
//! - **lazy**: `*_stream` yields items one at a time, fetching the next page
//!   only when the buffered one is used up. Each call starts over at page 1.
//!   A failed page fetch ends the stream; the error is logged, not yielded;
//! - **raw**: the [`HevyClient`] page methods themselves, for callers that
//!   need their own paging policy or error recovery.
//!
//! Workouts and routines advance to [`Page::next_page`]. Events advance by one
//! and stop once the reported page reaches the page count.
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use hevy_client::{HevyClientExt, http_client::ReqwestHevyClient};
//!
//! # async fn run(client: ReqwestHevyClient) {
//! let mut workouts = client.workouts_stream().take(5);
//! while let Some(workout) = workouts.next().await {
//!     println!("{}", workout.title);
//! }
//! # }
//! ```

use std::pin::Pin;

use async_stream::stream;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use tracing::warn;

use crate::utils::MAX_PAGE_SIZE;
use crate::{Event, HevyClient, HevyError, Page, Routine, Workout};

/// Page size used by the aggregators.
pub const AGGREGATE_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Lazily fetched sequence of items from a paginated endpoint.
pub type ItemStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

type PageFuture<'a, T> =
    Pin<Box<dyn std::future::Future<Output = Result<Page<T>, HevyError>> + Send + 'a>>;

/// How the cursor moves from one fetched page to the next.
#[derive(Clone, Copy, Debug)]
enum Advance {
    /// Jump to [`Page::next_page`].
    NextPage,
    /// Request the following page number until the reported page reaches the
    /// page count. `>=` rather than `==` so an empty result (page_count 0)
    /// terminates.
    Increment,
}

impl Advance {
    fn next<T>(self, requested: u32, result: &Page<T>) -> Option<u32> {
        match self {
            Advance::NextPage => result.next_page(),
            Advance::Increment => (!result.is_last()).then(|| requested + 1),
        }
    }
}

async fn collect_pages<'a, T, F>(advance: Advance, fetch: F) -> Result<Vec<T>, HevyError>
where
    F: Fn(u32) -> PageFuture<'a, T>,
{
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let result = fetch(page).await?;
        let next = advance.next(page, &result);
        items.extend(result.items);
        match next {
            Some(n) => page = n,
            None => break,
        }
    }
    Ok(items)
}

fn page_stream<'a, T, F>(resource: &'static str, advance: Advance, fetch: F) -> ItemStream<'a, T>
where
    T: Send + 'a,
    F: Fn(u32) -> PageFuture<'a, T> + Send + 'a,
{
    Box::pin(stream! {
        let mut page = 1;
        loop {
            let result = match fetch(page).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(resource, page, error = %e, "hevy: stream stopped");
                    break;
                }
            };
            let next = advance.next(page, &result);
            for item in result.items {
                yield item;
            }
            match next {
                Some(n) => page = n,
                None => break,
            }
        }
    })
}

pub async fn all_workouts<C>(client: &C) -> Result<Vec<Workout>, HevyError>
where
    C: HevyClient + ?Sized,
{
    collect_pages(Advance::NextPage, move |page| {
        client.get_workouts(page, AGGREGATE_PAGE_SIZE)
    })
    .await
}

pub fn workouts_stream<C>(client: &C) -> ItemStream<'_, Workout>
where
    C: HevyClient + ?Sized,
{
    page_stream("workouts", Advance::NextPage, move |page| {
        client.get_workouts(page, AGGREGATE_PAGE_SIZE)
    })
}

/// Fetch every event recorded after `since`.
pub async fn all_workout_events<C>(
    client: &C,
    since: DateTime<Utc>,
) -> Result<Vec<Event>, HevyError>
where
    C: HevyClient + ?Sized,
{
    collect_pages(Advance::Increment, move |page| {
        client.get_workout_events(page, AGGREGATE_PAGE_SIZE, since)
    })
    .await
}

pub fn workout_events_stream<C>(client: &C, since: DateTime<Utc>) -> ItemStream<'_, Event>
where
    C: HevyClient + ?Sized,
{
    page_stream("workout events", Advance::Increment, move |page| {
        client.get_workout_events(page, AGGREGATE_PAGE_SIZE, since)
    })
}

pub async fn all_routines<C>(client: &C) -> Result<Vec<Routine>, HevyError>
where
    C: HevyClient + ?Sized,
{
    collect_pages(Advance::NextPage, move |page| {
        client.get_routines(page, AGGREGATE_PAGE_SIZE)
    })
    .await
}

pub fn routines_stream<C>(client: &C) -> ItemStream<'_, Routine>
where
    C: HevyClient + ?Sized,
{
    page_stream("routines", Advance::NextPage, move |page| {
        client.get_routines(page, AGGREGATE_PAGE_SIZE)
    })
}

/// Pagination helpers available on every [`HevyClient`].
#[async_trait]
pub trait HevyClientExt: HevyClient {
    /// Fetch every workout. With a large history this makes many requests.
    async fn all_workouts(&self) -> Result<Vec<Workout>, HevyError> {
        all_workouts(self).await
    }

    fn workouts_stream(&self) -> ItemStream<'_, Workout> {
        workouts_stream(self)
    }

    async fn all_workout_events(&self, since: DateTime<Utc>) -> Result<Vec<Event>, HevyError> {
        all_workout_events(self, since).await
    }

    fn workout_events_stream(&self, since: DateTime<Utc>) -> ItemStream<'_, Event> {
        workout_events_stream(self, since)
    }

    async fn all_routines(&self) -> Result<Vec<Routine>, HevyError> {
        all_routines(self).await
    }

    fn routines_stream(&self) -> ItemStream<'_, Routine> {
        routines_stream(self)
    }
}

impl<T: HevyClient + ?Sized> HevyClientExt for T {}
