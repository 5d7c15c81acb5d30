use axum::{
    routing::{get, post},
    Router,
};

use crate::{app::Blueprint, state::AppState};

mod dto;
pub mod handlers;
pub mod password;

pub use dto::PublicUser;

pub fn blueprint() -> Blueprint {
    let router = Router::<AppState>::new()
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/signup", post(handlers::signup))
        .route("/logout", post(handlers::logout));
    Blueprint::new("auth", router)
}
