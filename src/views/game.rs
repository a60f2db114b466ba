use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    models::{GameSession, HintType},
    names,
    store::Flash,
    views::components,
};

fn status(game: &GameSession, locale: &str) -> Markup {
    html! {
        div.grid {
            p {
                (t!("game.questions_left", locale = locale)) ": "
                strong #questions-remaining { (game.questions_remaining) }
            }
            p {
                (t!("game.answers_left", locale = locale)) ": "
                strong #answers-remaining { (game.answers_remaining) }
            }
        }
    }
}

fn question_form(game: &GameSession, locale: &str) -> Markup {
    let disabled = game.questions_remaining == 0;
    html! {
        form hx-post=(names::ASK_QUESTION_URL) hx-target="main" hx-disabled-elt="find button" {
            fieldset role="group" {
                input name="question"
                      type="text"
                      autocomplete="off"
                      placeholder=(t!("game.question_placeholder", locale = locale))
                      aria-label=(t!("game.question_placeholder", locale = locale))
                      disabled[disabled]
                      required;
                button type="submit" disabled[disabled] { (t!("game.ask", locale = locale)) }
            }
        }
    }
}

fn hint_buttons(game: &GameSession, locale: &str) -> Markup {
    html! {
        div role="group" {
            @for hint in HintType::ALL {
                button.secondary
                       hx-post=(names::GET_HINT_URL)
                       hx-vals=(format!(r#"{{"hint_type":"{hint}"}}"#))
                       hx-target="main"
                       disabled[game.hint_used(hint)] {
                    (components::hint_label(hint, locale))
                }
            }
        }
        @if !game.hints_used.is_empty() {
            ul #hints {
                @for hint in &game.hints_used {
                    li {
                        strong { (components::hint_label(hint.hint_type, locale)) } ": "
                        (hint.text)
                    }
                }
            }
        }
    }
}

fn answer_form(game: &GameSession, locale: &str) -> Markup {
    html! {
        form hx-post=(names::SUBMIT_ANSWER_URL) hx-target="main" hx-disabled-elt="find button" {
            fieldset role="group" {
                input name="answer"
                      type="text"
                      autocomplete="off"
                      placeholder=(t!("game.answer_placeholder", locale = locale))
                      aria-label=(t!("game.answer_placeholder", locale = locale))
                      required;
                button type="submit" { (t!("game.submit", locale = locale)) }
            }
            small { (t!("game.answers_left_hint", count = game.answers_remaining, locale = locale)) }
        }
    }
}

fn question_log(game: &GameSession, locale: &str) -> Markup {
    html! {
        h3 { (t!("game.log_title", locale = locale)) }
        @if game.question_log.is_empty() {
            p { small { (t!("game.log_empty", locale = locale)) } }
        } @else {
            ol #question-log {
                @for record in &game.question_log {
                    li { (record) }
                }
            }
        }
    }
}

pub fn game(game: &GameSession, flashes: &[Flash], locale: &str) -> Markup {
    html! {
        (components::flashes(flashes))
        h1 { (t!("game.title", locale = locale)) }
        article {
            img #flag
                src=(game.flag_image_url)
                alt=(t!("game.flag_alt", locale = locale))
                width="320";
            (status(game, locale))
        }
        article {
            h3 { (t!("game.ask_title", locale = locale)) }
            (question_form(game, locale))
        }
        article {
            h3 { (t!("game.hint_title", locale = locale)) }
            (hint_buttons(game, locale))
        }
        article {
            h3 { (t!("game.answer_title", locale = locale)) }
            (answer_form(game, locale))
        }
        article {
            (question_log(game, locale))
        }
        form hx-post=(names::RESET_GAME_URL) hx-target="main" hx-push-url=(names::HOME_URL) {
            button.outline.contrast type="submit" { (t!("game.reset", locale = locale)) }
        }
    }
}
