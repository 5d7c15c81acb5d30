use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{
    config::AppConfig,
    db::Database,
    login::{cookie_key, LoginManager, SqlUserLoader},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub login: LoginManager,
    cookie_key: Key,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = Database::connect_lazy(&config)?;
        let loader = Arc::new(SqlUserLoader::new(db.clone()));
        let login = LoginManager::new(&config.session, loader)?;
        Ok(Self::from_parts(db, Arc::new(config), login))
    }

    pub fn from_parts(db: Database, config: Arc<AppConfig>, login: LoginManager) -> Self {
        let cookie_key = cookie_key(&config.secret_key);
        Self {
            db,
            config,
            login,
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
