//! Apply database migrations from the command line.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canvass_db::DbConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canvass_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DbConfig::from_env().expect("Database configuration incomplete");

    let pool = canvass_db::create_pool(&config)
        .await
        .expect("Failed to connect to database");

    canvass_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    canvass_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
}
