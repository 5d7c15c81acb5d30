//! The `main` blueprint: the public index and the login-required profile.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::instrument;

use crate::{
    app::Blueprint,
    auth::PublicUser,
    login::{CurrentUser, MaybeUser},
    state::AppState,
};

pub fn blueprint() -> Blueprint {
    let router = Router::<AppState>::new()
        .route("/", get(index))
        .route("/profile", get(profile));
    Blueprint::new("main", router)
}

#[instrument(skip_all)]
pub async fn index(MaybeUser(user): MaybeUser) -> Json<Value> {
    Json(match user {
        Some(user) => json!({ "message": format!("Welcome, {}!", user.name), "authenticated": true }),
        None => json!({ "message": "Welcome!", "authenticated": false }),
    })
}

#[instrument(skip_all)]
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}
