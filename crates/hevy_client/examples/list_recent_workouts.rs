use futures_util::StreamExt;
use hevy_client::{
    HevyClientExt, Volume, WeightUnit, config::Config, http_client::ReqwestHevyClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_env = std::env::var("HEVY_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let cfg = Config::from_env()?;
    let client = ReqwestHevyClient::from_config(&cfg)?;

    let limit = std::env::var("HEVY_LIMIT")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(5);
    let unit = match std::env::var("HEVY_UNIT").as_deref() {
        Ok("lb") => WeightUnit::Pounds,
        _ => WeightUnit::Kilograms,
    };

    // Only the pages needed for `limit` workouts are fetched.
    let mut workouts = client.workouts_stream().take(limit);
    println!("Recent workouts (limit {}):", limit);
    while let Some(w) = workouts.next().await {
        println!(
            "- {} {} ({} exercises, volume {:.0})",
            w.start_time.format("%Y-%m-%d"),
            w.title,
            w.exercises.len(),
            w.volume(unit)
        );
    }

    Ok(())
}
