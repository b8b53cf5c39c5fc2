use chrono::{TimeZone, Utc};
use futures_util::StreamExt;
use hevy_client::config::Config;
use hevy_client::http_client::ReqwestHevyClient;
use hevy_client::{Event, EventKind, HevyClient, HevyClientExt};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestHevyClient {
    let mut cfg = Config::new(SecretString::new("my-fake-api-key".into()));
    cfg.base_url = server.uri();
    ReqwestHevyClient::from_config(&cfg).expect("client")
}

fn since() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0)
        .single()
        .expect("timestamp")
}

async fn mount_events(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/workouts/events"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .and(query_param("since", "2024-08-01T00:00:00.000000000Z"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(include_str!("fixtures/workout_event-1.json"), "application/json"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn all_workout_events_counts_kinds() {
    let server = MockServer::start().await;
    mount_events(&server).await;
    let client = client_for(&server);

    let events = client.all_workout_events(since()).await.expect("events");
    assert_eq!(events.len(), 3);
    let updated = events.iter().filter(|e| e.kind() == EventKind::Updated).count();
    let deleted = events.iter().filter(|e| e.kind() == EventKind::Deleted).count();
    assert_eq!(updated, 2);
    assert_eq!(deleted, 1);

    let removed = events
        .iter()
        .find(|e| e.kind() == EventKind::Deleted)
        .expect("deleted event");
    assert_eq!(
        removed.workout_id().to_string(),
        "efe6801c-2ac2-4bd5-8e2a-4c5a34e77a1b"
    );
    assert!(removed.workout().is_none());
}

#[tokio::test]
async fn workout_events_stream_matches_eager_fetch() {
    let server = MockServer::start().await;
    mount_events(&server).await;
    let client = client_for(&server);

    let eager = client.all_workout_events(since()).await.expect("events");
    let lazy: Vec<Event> = client.workout_events_stream(since()).collect().await;
    assert_eq!(lazy, eager);
}

#[tokio::test]
async fn updated_event_embeds_workout_snapshot() {
    let server = MockServer::start().await;
    mount_events(&server).await;
    let client = client_for(&server);

    let page = client
        .get_workout_events(1, 10, since())
        .await
        .expect("page");
    assert_eq!(page.next_page(), None);
    let workout = page.items[2].workout().expect("updated event");
    assert_eq!(workout.title, "Morning Workout 💪");
    assert_eq!(page.items[2].workout_id(), workout.id);
}

#[tokio::test]
async fn events_follow_page_count() {
    let server = MockServer::start().await;
    let deleted = |id: &str| {
        serde_json::json!({"type": "deleted", "id": id, "deleted_at": "2024-08-21T12:31:56.032Z"})
    };
    Mock::given(method("GET"))
        .and(path("/v1/workouts/events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "page_count": 2,
            "events": [deleted("11111111-1111-1111-1111-111111111111")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/workouts/events"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 2,
            "page_count": 2,
            "events": [deleted("22222222-2222-2222-2222-222222222222")]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let events = client.all_workout_events(since()).await.expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(server.received_requests().await.expect("requests").len(), 2);
}
