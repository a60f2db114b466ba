use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::names;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name_ja: String,
    pub name_en: String,
    pub code: String,
}

impl Country {
    /// Name the player has to guess, in the language the game was started in.
    pub fn display_name(&self, locale: &str) -> &str {
        if locale == "ja" {
            &self.name_ja
        } else {
            &self.name_en
        }
    }
}

/// Countries used when the AI cannot pick one.
pub const FALLBACK_COUNTRIES: &[(&str, &str, &str)] = &[
    ("日本", "Japan", "jp"),
    ("アメリカ", "United States", "us"),
    ("イギリス", "United Kingdom", "gb"),
    ("フランス", "France", "fr"),
    ("ドイツ", "Germany", "de"),
    ("イタリア", "Italy", "it"),
    ("スペイン", "Spain", "es"),
    ("カナダ", "Canada", "ca"),
    ("オーストラリア", "Australia", "au"),
    ("ブラジル", "Brazil", "br"),
];

pub fn fallback_country(index: usize) -> Country {
    let (name_ja, name_en, code) = FALLBACK_COUNTRIES[index % FALLBACK_COUNTRIES.len()];
    Country {
        name_ja: name_ja.to_string(),
        name_en: name_en.to_string(),
        code: code.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintType {
    StapleFood,
    Area,
    Language,
}

impl HintType {
    pub const ALL: [HintType; 3] = [HintType::StapleFood, HintType::Area, HintType::Language];

    pub fn as_str(self) -> &'static str {
        match self {
            HintType::StapleFood => "staple-food",
            HintType::Area => "area",
            HintType::Language => "language",
        }
    }
}

impl fmt::Display for HintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownHintType;

impl FromStr for HintType {
    type Err = UnknownHintType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staple-food" => Ok(HintType::StapleFood),
            "area" => Ok(HintType::Area),
            "language" => Ok(HintType::Language),
            _ => Err(UnknownHintType),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q: {} → A: {}", self.question, self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHint {
    pub hint_type: HintType,
    pub text: String,
}

/// Everything the server remembers about one player's game.
///
/// Stored as a single value in the player's session and handed explicitly to
/// the game service, which returns it mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub target_country_display: String,
    pub target_country_reference: String,
    pub flag_image_url: String,
    pub questions_remaining: u32,
    pub answers_remaining: u32,
    /// Revealed hints in the order they were requested, at most one per type.
    pub hints_used: Vec<RevealedHint>,
    pub question_log: Vec<QuestionRecord>,
    pub active: bool,
    /// Language the AI is asked to answer in.
    pub language: String,
}

impl GameSession {
    pub fn new(country: &Country, locale: &str) -> Self {
        Self {
            target_country_display: country.display_name(locale).to_string(),
            target_country_reference: country.name_en.clone(),
            flag_image_url: names::flag_image_url(&country.code),
            questions_remaining: names::QUESTION_BUDGET,
            answers_remaining: names::ANSWER_BUDGET,
            hints_used: Vec::new(),
            question_log: Vec::new(),
            active: true,
            language: locale.to_string(),
        }
    }

    pub fn hint_used(&self, hint_type: HintType) -> bool {
        self.hints_used.iter().any(|h| h.hint_type == hint_type)
    }

    pub fn all_hints_used(&self) -> bool {
        HintType::ALL.iter().all(|&h| self.hint_used(h))
    }
}
