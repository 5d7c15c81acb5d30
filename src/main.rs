use gatehouse::{app::serve, create_app, telemetry, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let app = create_app(AppConfig::from_env())?;
    tracing::info!(blueprints = ?app.blueprint_names(), "application created");

    serve(app.router()).await
}
