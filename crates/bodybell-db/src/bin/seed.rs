//! Seed the catalog with the sample artist and album

use anyhow::{Context, Result};
use bodybell_db::{create_pool, run_migrations, seed_catalog, Repositories};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bodybell_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    let report = seed_catalog(&Repositories::postgres(pool)).await?;
    println!(
        "artist created: {}, album created: {}",
        report.artist_created, report.album_created
    );
    Ok(())
}
