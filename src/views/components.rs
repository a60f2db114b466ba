use maud::{html, Markup};
use rust_i18n::t;

use crate::{models::HintType, store::Flash};

pub fn hint_label(hint: HintType, locale: &str) -> String {
    match hint {
        HintType::StapleFood => t!("hint.staple_food", locale = locale).to_string(),
        HintType::Area => t!("hint.area", locale = locale).to_string(),
        HintType::Language => t!("hint.language", locale = locale).to_string(),
    }
}

/// Pending flash messages, one `article` each.
pub fn flashes(flashes: &[Flash]) -> Markup {
    html! {
        @for flash in flashes {
            article.flash.(flash.level.as_str()) role="status" {
                (flash.message)
            }
        }
    }
}
