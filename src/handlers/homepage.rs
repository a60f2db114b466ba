use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    extractors::{match_supported_locale, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    store, utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::HOME_URL, get(homepage))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

async fn homepage(
    session: Session,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Markup, AppError> {
    let flashes = store::take_flashes(&session).await?;
    let has_game = store::load_game(&session)
        .await?
        .is_some_and(|game| game.active);

    Ok(views::render(
        is_htmx,
        &t!("home.title", locale = &locale),
        homepage_views::start(&flashes, has_game, &locale),
        &locale,
    ))
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Form(body): Form<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = match_supported_locale(&body.locale).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
