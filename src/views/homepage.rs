use maud::{html, Markup};
use rust_i18n::t;

use crate::{names, store::Flash, views::components};

/// Start screen with the rules and the new game button.
pub fn start(flashes: &[Flash], has_game: bool, locale: &str) -> Markup {
    html! {
        (components::flashes(flashes))
        section.hero {
            h1 { (t!("home.title", locale = locale)) }
            p { (t!("home.description", locale = locale)) }
        }
        article {
            h2 { (t!("home.rules_title", locale = locale)) }
            ul {
                li { (t!("home.rule_questions", count = names::QUESTION_BUDGET, locale = locale)) }
                li { (t!("home.rule_hints", locale = locale)) }
                li { (t!("home.rule_answers", count = names::ANSWER_BUDGET, locale = locale)) }
            }
            form hx-post=(names::NEW_GAME_URL)
                 hx-target="main"
                 hx-push-url=(names::GAME_URL)
                 hx-disabled-elt="find button" {
                button type="submit" { (t!("home.start", locale = locale)) }
            }
            @if has_game {
                p {
                    a href=(names::GAME_URL) { (t!("home.continue", locale = locale)) }
                }
            }
        }
    }
}
