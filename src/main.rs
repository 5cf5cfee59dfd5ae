use run_coach::config::{AppConfig, DatabaseConfig};
use run_coach::services::BackgroundJobService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config.create_pool().await?;

    sqlx::migrate!().run(&pool).await?;

    let mut jobs = BackgroundJobService::new(pool, config.weekly_schedule).await?;
    jobs.start().await?;
    info!("run-coach scheduler running; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    jobs.stop().await?;

    Ok(())
}
