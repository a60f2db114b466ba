use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{names, utils};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn locale_switcher(locale: &str) -> Markup {
    html! {
        @for &lang in names::SUPPORTED_LOCALES {
            li {
                @if lang == locale {
                    strong { (t!("locale.name", locale = lang)) }
                } @else {
                    a href="#"
                      hx-post=(names::SET_LOCALE_URL)
                      hx-vals=(format!(r#"{{"locale":"{lang}"}}"#)) {
                        (t!("locale.name", locale = lang))
                    }
                }
            }
        }
    }
}

fn header(locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href=(names::HOME_URL) {
                            strong { (t!("app.name", locale = locale)) }
                        }
                    }
                }
                ul {
                    (locale_switcher(locale))
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";

                (css())
                (js())
                (icon())

                title { (title) " - " (t!("app.name", locale = locale)) }
            }

            body."container" {
                (header(locale))
                (main(body))
            }
        }
    }
}

pub fn titled(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        title { (title) " - " (t!("app.name", locale = locale)) }
        (body)
    }
}

/// Full page for normal requests, just the `main` contents for htmx swaps.
pub fn render(is_htmx: bool, title: &str, body: Markup, locale: &str) -> Markup {
    if is_htmx {
        titled(title, body, locale)
    } else {
        page(title, body, locale)
    }
}
