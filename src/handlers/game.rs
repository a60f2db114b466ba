use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use rust_i18n::t;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    extractors::{IsHtmx, Locale},
    names,
    rejections::AppError,
    services::game::{AnswerOutcome, CountrySource, GameError, ValidationError},
    store::{self, FlashLevel},
    views,
    views::{components, game as game_views},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::NEW_GAME_URL, post(new_game))
        .route(names::GAME_URL, get(game_page))
        .route(names::ASK_QUESTION_URL, post(ask_question))
        .route(names::GET_HINT_URL, post(get_hint))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
        .route(names::RESET_GAME_URL, post(reset_game))
}

fn error_message(err: &GameError, locale: &str) -> String {
    match err {
        GameError::Generation(_) | GameError::Judging(_) => {
            t!("error.ai_failed", locale = locale).to_string()
        }
        GameError::Validation(v) => match v {
            ValidationError::NotStarted => t!("error.not_started", locale = locale).to_string(),
            ValidationError::NoQuestionsLeft => {
                t!("error.no_questions_left", locale = locale).to_string()
            }
            ValidationError::NoAnswersLeft => {
                t!("error.no_answers_left", locale = locale).to_string()
            }
            ValidationError::EmptyQuestion => {
                t!("error.empty_question", locale = locale).to_string()
            }
            ValidationError::EmptyAnswer => t!("error.empty_answer", locale = locale).to_string(),
            ValidationError::MissingHintType => {
                t!("error.missing_hint_type", locale = locale).to_string()
            }
            ValidationError::UnknownHintType => {
                t!("error.unknown_hint_type", locale = locale).to_string()
            }
            ValidationError::HintAlreadyUsed(hint) => t!(
                "error.hint_already_used",
                hint = components::hint_label(*hint, locale),
                locale = locale
            )
            .to_string(),
        },
    }
}

/// Flash the error and go back to the game screen.
async fn reject_action(
    session: &Session,
    err: GameError,
    locale: &str,
) -> Result<Response, AppError> {
    tracing::debug!("game action rejected: {err}");
    store::flash(session, FlashLevel::Error, error_message(&err, locale)).await?;
    Ok(Redirect::to(names::GAME_URL).into_response())
}

/// No game in this session: send the player to the start screen.
async fn no_game(session: &Session, locale: &str) -> Result<Response, AppError> {
    store::flash(
        session,
        FlashLevel::Error,
        error_message(&ValidationError::NotStarted.into(), locale),
    )
    .await?;
    Ok(Redirect::to(names::HOME_URL).into_response())
}

async fn new_game(
    State(state): State<AppState>,
    session: Session,
    Locale(locale): Locale,
) -> Result<Redirect, AppError> {
    let new_game = state.game.start_game(&locale).await;
    match new_game.source {
        CountrySource::Ai => tracing::info!("new game started with an AI-picked country"),
        CountrySource::Fallback => tracing::info!("new game started with a fallback country"),
    }

    store::save_game(&session, &new_game.session).await?;
    store::flash(
        &session,
        FlashLevel::Success,
        t!("flash.game_started", locale = &locale),
    )
    .await?;

    Ok(Redirect::to(names::GAME_URL))
}

async fn game_page(
    session: Session,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    let game = match store::load_game(&session).await? {
        Some(game) if game.active => game,
        _ => {
            store::flash(
                &session,
                FlashLevel::Info,
                t!("flash.start_first", locale = &locale),
            )
            .await?;
            return Ok(Redirect::to(names::HOME_URL).into_response());
        }
    };

    let flashes = store::take_flashes(&session).await?;
    Ok(views::render(
        is_htmx,
        &t!("game.title", locale = &locale),
        game_views::game(&game, &flashes, &locale),
        &locale,
    )
    .into_response())
}

#[derive(Deserialize)]
struct AskQuestionBody {
    #[serde(default)]
    question: String,
}

async fn ask_question(
    State(state): State<AppState>,
    session: Session,
    Locale(locale): Locale,
    Form(body): Form<AskQuestionBody>,
) -> Result<Response, AppError> {
    let Some(mut game) = store::load_game(&session).await? else {
        return no_game(&session, &locale).await;
    };

    match state.game.ask_question(&mut game, &body.question).await {
        Ok(answer) => {
            store::save_game(&session, &game).await?;
            store::flash(
                &session,
                FlashLevel::Info,
                t!("flash.answer", answer = answer, locale = &locale),
            )
            .await?;
            Ok(Redirect::to(names::GAME_URL).into_response())
        }
        Err(e) => reject_action(&session, e, &locale).await,
    }
}

#[derive(Deserialize)]
struct GetHintBody {
    #[serde(default)]
    hint_type: Option<String>,
}

async fn get_hint(
    State(state): State<AppState>,
    session: Session,
    Locale(locale): Locale,
    Form(body): Form<GetHintBody>,
) -> Result<Response, AppError> {
    let Some(mut game) = store::load_game(&session).await? else {
        return no_game(&session, &locale).await;
    };

    match state
        .game
        .request_hint(&mut game, body.hint_type.as_deref())
        .await
    {
        Ok(hint) => {
            store::save_game(&session, &game).await?;
            store::flash(
                &session,
                FlashLevel::Info,
                t!(
                    "flash.hint",
                    hint = components::hint_label(hint.hint_type, &locale),
                    text = hint.text,
                    locale = &locale
                ),
            )
            .await?;
            Ok(Redirect::to(names::GAME_URL).into_response())
        }
        Err(e) => reject_action(&session, e, &locale).await,
    }
}

#[derive(Deserialize)]
struct SubmitAnswerBody {
    #[serde(default)]
    answer: String,
}

async fn submit_answer(
    State(state): State<AppState>,
    session: Session,
    Locale(locale): Locale,
    Form(body): Form<SubmitAnswerBody>,
) -> Result<Response, AppError> {
    let Some(mut game) = store::load_game(&session).await? else {
        return no_game(&session, &locale).await;
    };

    let outcome = match state.game.submit_answer(&mut game, &body.answer).await {
        Ok(outcome) => outcome,
        Err(e) => return reject_action(&session, e, &locale).await,
    };
    store::save_game(&session, &game).await?;

    let (level, message, target) = match outcome {
        AnswerOutcome::Correct { country, .. } => (
            FlashLevel::Success,
            t!("flash.correct", country = country, locale = &locale),
            names::HOME_URL,
        ),
        AnswerOutcome::Incorrect { answers_remaining } => (
            FlashLevel::Error,
            t!("flash.incorrect", count = answers_remaining, locale = &locale),
            names::GAME_URL,
        ),
        AnswerOutcome::Lost { country } => (
            FlashLevel::Error,
            t!("flash.lost", country = country, locale = &locale),
            names::HOME_URL,
        ),
    };
    store::flash(&session, level, message).await?;

    Ok(Redirect::to(target).into_response())
}

async fn reset_game(session: Session, Locale(locale): Locale) -> Result<Redirect, AppError> {
    store::clear_game(&session).await?;
    tracing::info!("game reset");
    store::flash(
        &session,
        FlashLevel::Info,
        t!("flash.reset", locale = &locale),
    )
    .await?;

    Ok(Redirect::to(names::HOME_URL))
}
