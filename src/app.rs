use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{auth, config::AppConfig, db::Database, pages, state::AppState};

/// A named group of routes that can be registered on an [`App`].
pub struct Blueprint {
    pub name: &'static str,
    pub router: Router<AppState>,
}

impl Blueprint {
    pub fn new(name: &'static str, router: Router<AppState>) -> Self {
        Self { name, router }
    }
}

/// A fully configured application, ready to be served.
pub struct App {
    state: AppState,
    blueprints: Vec<Blueprint>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            blueprints: Vec::new(),
        }
    }

    pub fn register_blueprint(&mut self, blueprint: Blueprint) -> anyhow::Result<()> {
        if self.blueprints.iter().any(|b| b.name == blueprint.name) {
            anyhow::bail!("blueprint {:?} is already registered", blueprint.name);
        }
        debug!(name = blueprint.name, "blueprint registered");
        self.blueprints.push(blueprint);
        Ok(())
    }

    pub fn blueprint_names(&self) -> Vec<&'static str> {
        self.blueprints.iter().map(|b| b.name).collect()
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub fn router(&self) -> Router {
        let routes = self
            .blueprints
            .iter()
            .fold(Router::new(), |acc, bp| acc.merge(bp.router.clone()));

        routes.with_state(self.state.clone()).layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
    }
}

/// Builds the application: database handle, login manager and the `auth`
/// and `main` blueprints.
pub fn create_app(config: AppConfig) -> anyhow::Result<App> {
    let state = AppState::init(config)?;
    let mut app = App::new(state);
    app.register_blueprint(auth::blueprint())?;
    app.register_blueprint(pages::blueprint())?;
    Ok(app)
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_blueprint_is_rejected() {
        let mut app = create_app(AppConfig::in_memory()).expect("app");
        let err = app.register_blueprint(auth::blueprint()).unwrap_err();
        assert!(err.to_string().contains("already registered"));
        assert_eq!(app.blueprint_names(), vec!["auth", "main"]);
    }
}
