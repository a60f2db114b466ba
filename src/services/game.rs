use color_eyre::Result;
use rand::Rng;

use crate::ai::GeminiClient;
use crate::models::{self, Country, GameSession, HintType, QuestionRecord, RevealedHint};

// ---------------------------------------------------------------------------
// TextGenerator trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait TextGenerator: Send + Sync {
    /// Send a plain prompt and return the plain-text reply.
    fn generate(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no game in progress")]
    NotStarted,
    #[error("no questions left")]
    NoQuestionsLeft,
    #[error("no answers left")]
    NoAnswersLeft,
    #[error("question is empty")]
    EmptyQuestion,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("hint type is missing")]
    MissingHintType,
    #[error("unknown hint type")]
    UnknownHintType,
    #[error("hint '{0}' was already used")]
    HintAlreadyUsed(HintType),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("text generation failed: {0}")]
    Generation(String),
    #[error("answer judging failed: {0}")]
    Judging(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Where the country of a new game came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySource {
    Ai,
    Fallback,
}

pub struct NewGame {
    pub session: GameSession,
    pub source: CountrySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeMethod {
    ExactMatch,
    Ai,
    /// The AI call failed and the guess was counted as wrong.
    AiFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Guess accepted; the game is over.
    Correct { country: String, method: JudgeMethod },
    /// Guess rejected; the player may try again.
    Incorrect { answers_remaining: u32 },
    /// Guess rejected and no attempts are left; the game is over.
    Lost { country: String },
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

const JAPANESE_NAME_LABEL: &str = "Japanese name:";
const ENGLISH_NAME_LABEL: &str = "English name:";
const COUNTRY_CODE_LABEL: &str = "Country code:";

const COUNTRY_PROMPT: &str = "Pick one United Nations member state at random.
Reply with exactly these three lines and nothing else:
Japanese name: [country name in Japanese]
English name: [country name in English]
Country code: [ISO 3166-1 alpha-2 code, two lowercase letters]";

fn language_name(locale: &str) -> &'static str {
    match locale {
        "ja" => "Japanese",
        _ => "English",
    }
}

fn question_prompt(game: &GameSession, question: &str) -> String {
    format!(
        "Question: \"{question}\"
Target country: {country}

Answer only \"yes\" or \"no\", written in {language}.
Never mention any country or region name.",
        country = game.target_country_reference,
        language = language_name(&game.language),
    )
}

fn hint_prompt(game: &GameSession, hint_type: HintType) -> String {
    let country = &game.target_country_reference;
    let topic = match hint_type {
        HintType::StapleFood => format!("Describe the staple food of {country}"),
        HintType::Area => format!("Compare the land area of {country} with that of Japan"),
        HintType::Language => format!("Name the official language(s) of {country}"),
    };
    format!(
        "{topic} in 50 characters or fewer, written in {language}.
Never mention any country or region name.",
        language = language_name(&game.language),
    )
}

fn judge_prompt(correct: &str, answer: &str) -> String {
    format!(
        "Correct answer: {correct}
Player's answer: {answer}

Only abbreviations and spelling variants of the correct answer count as correct.
A different country, region or city is incorrect.
Reply with exactly one word: correct or incorrect."
    )
}

/// Text after the first `:` of a labelled line, without markdown emphasis.
fn label_value(line: &str) -> Option<String> {
    let (_, value) = line.split_once(':')?;
    let value = value.trim_matches(|c: char| c.is_whitespace() || c == '*');
    (!value.is_empty()).then(|| value.to_string())
}

/// Extract a country from a labelled AI reply.
pub fn parse_country(reply: &str) -> Result<Country, GameError> {
    let mut name_ja = None;
    let mut name_en = None;
    let mut code = None;

    for line in reply.lines() {
        if line.contains(JAPANESE_NAME_LABEL) {
            name_ja = label_value(line);
        } else if line.contains(ENGLISH_NAME_LABEL) {
            name_en = label_value(line);
        } else if line.contains(COUNTRY_CODE_LABEL) {
            code = label_value(line);
        }
    }

    match (name_ja, name_en, code) {
        (Some(name_ja), Some(name_en), Some(code))
            if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            Ok(Country {
                name_ja,
                name_en,
                code: code.to_ascii_lowercase(),
            })
        }
        (name_ja, name_en, code) => Err(GameError::Generation(format!(
            "incomplete country reply: jp={name_ja:?}, en={name_en:?}, code={code:?}"
        ))),
    }
}

/// Whether the judge reply accepts the guess.
fn is_correct_verdict(reply: &str) -> bool {
    reply
        .trim()
        .trim_end_matches('.')
        .trim_end()
        .eq_ignore_ascii_case("correct")
}

// ---------------------------------------------------------------------------
// GameService
// ---------------------------------------------------------------------------

pub struct GameService<G: TextGenerator = GeminiClient> {
    ai: G,
}

impl<G: TextGenerator + Clone> Clone for GameService<G> {
    fn clone(&self) -> Self {
        Self {
            ai: self.ai.clone(),
        }
    }
}

impl<G: TextGenerator> GameService<G> {
    pub fn new(ai: G) -> Self {
        Self { ai }
    }

    /// Ask the AI for a random country.
    pub async fn pick_country(&self) -> Result<Country, GameError> {
        let reply = self
            .ai
            .generate(COUNTRY_PROMPT)
            .await
            .map_err(|e| GameError::Generation(e.to_string()))?;
        parse_country(&reply)
    }

    /// Start a fresh game. Never fails: the fallback list covers AI failures.
    pub async fn start_game(&self, locale: &str) -> NewGame {
        let (country, source) = match self.pick_country().await {
            Ok(country) => {
                tracing::info!("AI picked country {} ({})", country.name_en, country.code);
                (country, CountrySource::Ai)
            }
            Err(e) => {
                tracing::warn!("falling back to the static country list: {e}");
                let index = rand::thread_rng().gen_range(0..models::FALLBACK_COUNTRIES.len());
                (models::fallback_country(index), CountrySource::Fallback)
            }
        };

        NewGame {
            session: GameSession::new(&country, locale),
            source,
        }
    }

    pub async fn ask_question(
        &self,
        game: &mut GameSession,
        question: &str,
    ) -> Result<String, GameError> {
        if !game.active {
            return Err(ValidationError::NotStarted.into());
        }
        if game.questions_remaining == 0 {
            return Err(ValidationError::NoQuestionsLeft.into());
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let answer = self
            .ai
            .generate(&question_prompt(game, question))
            .await
            .map_err(|e| GameError::Generation(e.to_string()))?
            .trim()
            .to_string();
        if answer.is_empty() {
            return Err(GameError::Generation("empty answer".to_string()));
        }

        game.question_log.push(QuestionRecord {
            question: question.to_string(),
            answer: answer.clone(),
        });
        game.questions_remaining -= 1;

        tracing::debug!("question answered: {question} -> {answer}");
        Ok(answer)
    }

    pub async fn request_hint(
        &self,
        game: &mut GameSession,
        hint_type: Option<&str>,
    ) -> Result<RevealedHint, GameError> {
        if !game.active {
            return Err(ValidationError::NotStarted.into());
        }
        let hint_type = match hint_type.map(str::trim) {
            None | Some("") => return Err(ValidationError::MissingHintType.into()),
            Some(raw) => raw
                .parse::<HintType>()
                .map_err(|_| ValidationError::UnknownHintType)?,
        };
        if game.hint_used(hint_type) {
            return Err(ValidationError::HintAlreadyUsed(hint_type).into());
        }

        let text = self
            .ai
            .generate(&hint_prompt(game, hint_type))
            .await
            .map_err(|e| GameError::Generation(e.to_string()))?
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(GameError::Generation("empty hint".to_string()));
        }

        let hint = RevealedHint { hint_type, text };
        game.hints_used.push(hint.clone());

        tracing::debug!("hint {hint_type} revealed");
        Ok(hint)
    }

    /// Ask the AI whether `answer` names the same country as `correct`.
    async fn judge(&self, correct: &str, answer: &str) -> Result<bool, GameError> {
        let reply = self
            .ai
            .generate(&judge_prompt(correct, answer))
            .await
            .map_err(|e| GameError::Judging(e.to_string()))?;
        tracing::debug!("AI judged {answer} against {correct}: {}", reply.trim());
        Ok(is_correct_verdict(&reply))
    }

    pub async fn submit_answer(
        &self,
        game: &mut GameSession,
        answer: &str,
    ) -> Result<AnswerOutcome, GameError> {
        if !game.active {
            return Err(ValidationError::NotStarted.into());
        }
        if game.answers_remaining == 0 {
            return Err(ValidationError::NoAnswersLeft.into());
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer.into());
        }

        let country = game.target_country_display.clone();
        let (correct, method) = if answer == country {
            (true, JudgeMethod::ExactMatch)
        } else {
            match self.judge(&country, answer).await {
                Ok(correct) => (correct, JudgeMethod::Ai),
                Err(e) => {
                    tracing::error!("{e}; counting the guess as incorrect");
                    (false, JudgeMethod::AiFailed)
                }
            }
        };

        game.answers_remaining -= 1;
        tracing::info!("guess {answer}: correct={correct} ({method:?})");

        if correct {
            game.active = false;
            return Ok(AnswerOutcome::Correct { country, method });
        }
        if game.answers_remaining > 0 {
            return Ok(AnswerOutcome::Incorrect {
                answers_remaining: game.answers_remaining,
            });
        }
        game.active = false;
        Ok(AnswerOutcome::Lost { country })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
