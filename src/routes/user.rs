//! User session endpoints.
//!
//! Session state travels in an HttpOnly cookie; the cookie layer in the
//! pipeline parses it before these handlers run.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use crate::http::error::{AppError, AppResult};
use crate::http::server::AppState;

const SESSION_COOKIE: &str = "fitshop_session";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub username: String,
}

async fn login(cookies: Cookies, Json(input): Json<LoginInput>) -> AppResult<Json<SessionInfo>> {
    if input.username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".into()));
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, input.username.clone());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);

    Ok(Json(SessionInfo {
        username: input.username,
    }))
}

async fn logout(cookies: Cookies) -> Json<serde_json::Value> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Json(serde_json::json!({ "loggedOut": true }))
}

async fn me(cookies: Cookies) -> AppResult<Json<SessionInfo>> {
    let session = cookies
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".into()))?;

    Ok(Json(SessionInfo {
        username: session.value().to_string(),
    }))
}
