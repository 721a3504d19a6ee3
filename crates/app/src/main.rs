use migration::{Migrator, MigratorTrait};
use server::{CorsPolicy, ServerConfig};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let cors = CorsPolicy::new(
        settings.cors.allowed_origins.iter().cloned(),
        settings.cors.preview_origin_pattern.as_deref(),
    )?;
    if settings.cors.allowed_origins.is_empty() && settings.cors.preview_origin_pattern.is_none() {
        tracing::warn!("no allowed origins configured: cross-origin requests will be rejected");
    }

    let config = ServerConfig {
        api_prefix: settings.server.api_prefix.clone(),
        cors,
    };
    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    server::run_with_listener(engine, config, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    tracing::info!("connecting to {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
