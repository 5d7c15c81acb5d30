//! Session-based login manager.
//!
//! The id of the logged-in user is kept in a signed cookie. On each request
//! the configured [`UserLoader`] rehydrates the full [`User`] from that id.

mod extractors;
mod loader;

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use tracing::{debug, warn};

use crate::{config::SessionConfig, error::AppError, models::User};

pub use extractors::{CurrentUser, MaybeUser};
pub use loader::{SqlUserLoader, UserLoader};

/// Derives the cookie signing key from the application secret.
///
/// `Key` needs 64 bytes of material; a SHA-512 digest lets the secret be of
/// any length.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[derive(Clone)]
pub struct LoginManager {
    loader: Arc<dyn UserLoader>,
    login_view: Option<String>,
    cookie_name: String,
    remember_for: time::Duration,
}

impl LoginManager {
    /// Fails when `remember_days` is not a positive number of days that fits
    /// in a cookie max-age.
    pub fn new(session: &SessionConfig, loader: Arc<dyn UserLoader>) -> anyhow::Result<Self> {
        let remember_for = session
            .remember_days
            .checked_mul(86_400)
            .filter(|secs| *secs > 0)
            .map(time::Duration::seconds)
            .ok_or_else(|| {
                anyhow::anyhow!("invalid remember duration: {} days", session.remember_days)
            })?;
        Ok(Self {
            loader,
            login_view: session.login_view.clone(),
            cookie_name: session.cookie_name.clone(),
            remember_for,
        })
    }

    /// Binds `user` to the session. Without `remember` the cookie lasts for
    /// the browser session only.
    pub fn login_user(&self, jar: SignedCookieJar, user: &User, remember: bool) -> SignedCookieJar {
        let mut cookie = Cookie::build((self.cookie_name.clone(), user.id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if remember {
            cookie = cookie.max_age(self.remember_for);
        }
        debug!(user_id = user.id, remember, "session started");
        jar.add(cookie)
    }

    pub fn logout_user(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }

    /// Returns the user bound to the session, if any. Cookies with a bad
    /// signature are dropped by the jar and read as anonymous.
    pub async fn current_user(&self, jar: &SignedCookieJar) -> anyhow::Result<Option<User>> {
        let Some(cookie) = jar.get(&self.cookie_name) else {
            return Ok(None);
        };
        self.loader.load_user(cookie.value()).await
    }

    /// Response for an anonymous request to a login-required route.
    pub fn unauthorized(&self, next: &str) -> Response {
        warn!(next, "login required");
        match &self.login_view {
            Some(view) => {
                Redirect::to(&format!("{view}?next={}", urlencoding::encode(next))).into_response()
            }
            None => AppError::Unauthorized.into_response(),
        }
    }
}
