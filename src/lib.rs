rust_i18n::i18n!("locales", fallback = "en");

pub mod ai;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod store;
pub mod utils;
pub mod views;

use axum::{middleware, Router};
use tower_sessions::{cookie::time::Duration, Expiry, MemoryStore, SessionManagerLayer};

use crate::services::game::GameService;

#[derive(Clone)]
pub struct AppState {
    pub game: GameService,
    pub secure_cookies: bool,
    /// Idle time after which a player's session (and game) is dropped.
    pub session_idle_minutes: i64,
}

pub fn router(state: AppState) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            state.session_idle_minutes,
        )));

    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::game::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .fallback(rejections::not_found)
        .layer(sessions)
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
