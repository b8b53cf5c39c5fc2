use chrono::{Duration, Utc};
use hevy_client::{Event, HevyClientExt, config::Config, http_client::ReqwestHevyClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;
    let client = ReqwestHevyClient::from_config(&cfg)?;

    let days_back = std::env::args()
        .nth(1)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(7);
    let since = Utc::now() - Duration::days(days_back);

    let events = client
        .all_workout_events(since)
        .await
        .map_err(|e| format!("failed to fetch events: {}", e))?;

    if events.is_empty() {
        println!("No workout changes in the last {days_back} days");
        return Ok(());
    }

    for event in events {
        match event {
            Event::Updated { workout } => println!("updated {} {}", workout.id, workout.title),
            Event::Deleted { id, deleted_at } => println!("deleted {id} at {deleted_at}"),
        }
    }
    Ok(())
}
