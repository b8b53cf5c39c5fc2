use hevy_client::{HevyClient, config::Config, http_client::ReqwestHevyClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects HEVY_API_KEY in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestHevyClient::from_config(&cfg)?;
    let count = client.workout_count().await?;
    println!("Workouts logged: {count}");
    Ok(())
}
