pub const HOME_URL: &str = "/";
pub const NEW_GAME_URL: &str = "/new-game";
pub const GAME_URL: &str = "/game";
pub const ASK_QUESTION_URL: &str = "/ask-question";
pub const GET_HINT_URL: &str = "/get-hint";
pub const SUBMIT_ANSWER_URL: &str = "/submit-answer";
pub const RESET_GAME_URL: &str = "/reset-game";

// Session keys
pub const GAME_SESSION_KEY: &str = "game";
pub const FLASH_SESSION_KEY: &str = "flash";

// Game budget
pub const QUESTION_BUDGET: u32 = 10;
pub const ANSWER_BUDGET: u32 = 2;

pub fn flag_image_url(country_code: &str) -> String {
    format!("https://flagcdn.com/w320/{country_code}.png")
}

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";
pub const SET_LOCALE_URL: &str = "/set-locale";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "ja"];
