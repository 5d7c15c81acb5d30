pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod login;
pub mod models;
pub mod pages;
pub mod state;
pub mod telemetry;

pub use app::{create_app, App, Blueprint};
pub use config::AppConfig;
pub use db::Database;
pub use state::AppState;
