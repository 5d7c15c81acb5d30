use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, NextQuery, PublicUser, SignupRequest},
        password::{hash_password, is_valid_email, verify_password, MIN_PASSWORD_LEN},
    },
    error::{AppError, Result},
    login::CurrentUser,
    models::User,
    state::AppState,
};

/// Describes the login form; anonymous users are redirected here.
pub async fn login_form(Query(q): Query<NextQuery>) -> Json<Value> {
    Json(json!({
        "form": "login",
        "method": "POST",
        "fields": ["email", "password", "remember"],
        "next": q.next,
    }))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    payload.email = payload.email.trim().to_lowercase();
    let name = payload.name.trim();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    if User::find_by_email(state.db.pool(), &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email address already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = match User::create(state.db.pool(), &payload.email, name, &hash).await {
        Ok(u) => u,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::Conflict("Email address already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(SignedCookieJar, Json<PublicUser>)> {
    payload.email = payload.email.trim().to_lowercase();

    let Some(user) = User::find_by_email(state.db.pool(), &payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let jar = state.login.login_user(jar, &user, payload.remember);
    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((jar, Json(user.into())))
}

#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
) -> (SignedCookieJar, StatusCode) {
    info!(user_id = user.id, "user logged out");
    (state.login.logout_user(jar), StatusCode::NO_CONTENT)
}
