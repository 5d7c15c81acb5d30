//! One-off schema initializer: creates every model table and exits.

use gatehouse::{create_app, telemetry, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let app = create_app(AppConfig::from_env())?;
    app.db().create_all().await?;

    let tables = app.db().table_names().await?;
    tracing::info!(url = %app.config().database_url, ?tables, "database initialized");
    Ok(())
}
