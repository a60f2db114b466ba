//! Game state and flash messages kept in the player's session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    models::GameSession,
    names,
    rejections::{AppError, ResultExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Error => "error",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

pub async fn load_game(session: &Session) -> Result<Option<GameSession>, AppError> {
    session
        .get::<GameSession>(names::GAME_SESSION_KEY)
        .await
        .reject("could not load game from session")
}

pub async fn save_game(session: &Session, game: &GameSession) -> Result<(), AppError> {
    session
        .insert(names::GAME_SESSION_KEY, game)
        .await
        .reject("could not save game to session")
}

pub async fn clear_game(session: &Session) -> Result<(), AppError> {
    session
        .remove::<GameSession>(names::GAME_SESSION_KEY)
        .await
        .reject("could not clear game from session")?;
    Ok(())
}

pub async fn flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), AppError> {
    let mut flashes = session
        .get::<Vec<Flash>>(names::FLASH_SESSION_KEY)
        .await
        .reject("could not load flash messages")?
        .unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session
        .insert(names::FLASH_SESSION_KEY, flashes)
        .await
        .reject("could not save flash messages")
}

/// Remove and return all pending flash messages.
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, AppError> {
    Ok(session
        .remove::<Vec<Flash>>(names::FLASH_SESSION_KEY)
        .await
        .reject("could not load flash messages")?
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::fallback_country;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn game_round_trips_and_clears() {
        let session = session();
        assert_eq!(load_game(&session).await.unwrap(), None);

        let game = GameSession::new(&fallback_country(2), "en");
        save_game(&session, &game).await.unwrap();
        assert_eq!(load_game(&session).await.unwrap(), Some(game));

        clear_game(&session).await.unwrap();
        assert_eq!(load_game(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn flashes_are_taken_once_in_order() {
        let session = session();
        flash(&session, FlashLevel::Info, "first").await.unwrap();
        flash(&session, FlashLevel::Error, "second").await.unwrap();

        let flashes = take_flashes(&session).await.unwrap();
        assert_eq!(
            flashes
                .iter()
                .map(|f| (f.level, f.message.as_str()))
                .collect::<Vec<_>>(),
            vec![(FlashLevel::Info, "first"), (FlashLevel::Error, "second")]
        );
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }
}
