use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};

use crate::{error::AppError, models::User, state::AppState};

/// The logged-in user. Anonymous requests are rejected by the login manager.
pub struct CurrentUser(pub User);

/// The logged-in user, if there is one.
pub struct MaybeUser(pub Option<User>);

async fn session_user(parts: &mut Parts, state: &AppState) -> Result<Option<User>, Response> {
    let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
        .await
        .map_err(|never| -> Response { match never {} })?;
    state
        .login
        .current_user(&jar)
        .await
        .map_err(|e| AppError::Internal(e).into_response())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(state.login.unauthorized(next))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_user(parts, state).await?))
    }
}
