#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    routing::post,
    Json, Router,
};
use flagquiz::{ai::GeminiClient, router, services::game::GameService, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// tower-sessions' default cookie name.
const SESSION_COOKIE_PREFIX: &str = "id=";

/// Base URL nothing listens on, so every AI call fails.
pub const UNREACHABLE_AI: &str = "http://127.0.0.1:1";

fn fake_reply(prompt: &str) -> String {
    if prompt.contains("United Nations member state") {
        "Japanese name: ケニア\nEnglish name: Kenya\nCountry code: ke".to_string()
    } else if prompt.contains("Correct answer:") {
        if prompt.contains("Player's answer: Kenia") {
            "correct".to_string()
        } else {
            "incorrect".to_string()
        }
    } else if prompt.contains("Question:") {
        "Yes".to_string()
    } else {
        "Mostly ugali".to_string()
    }
}

async fn generate_content(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": fake_reply(prompt) }] } }]
    }))
}

/// Serve a Gemini stand-in on a random local port and return its base URL.
///
/// It always picks Kenya, answers every question with "Yes" and only accepts
/// the guess "Kenia" as a spelling variant.
pub async fn spawn_fake_gemini() -> String {
    let app = Router::new().route("/v1beta/models/{action}", post(generate_content));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake gemini");
    let address = listener.local_addr().expect("fake gemini address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake gemini server");
    });
    format!("http://{address}")
}

pub fn app(ai_base_url: &str) -> Router {
    let ai = GeminiClient::new(
        "test-key".to_string(),
        "gemini-test".to_string(),
        ai_base_url.to_string(),
        Duration::from_secs(5),
    )
    .expect("build gemini client");

    router(AppState {
        game: GameService::new(ai),
        secure_cookies: false,
        session_idle_minutes: 60,
    })
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect location")
}

/// A browser stand-in that keeps the session cookie between requests.
pub struct Player {
    app: Router,
    cookie: Option<String>,
    locale: &'static str,
}

impl Player {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookie: None,
            locale: "en",
        }
    }

    pub fn with_locale(mut self, locale: &'static str) -> Self {
        self.locale = locale;
        self
    }

    async fn send(&mut self, req: Request<Body>) -> Response<Body> {
        let resp = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        if let Some(set_cookie) = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            if pair.starts_with(SESSION_COOKIE_PREFIX) {
                self.cookie = Some(pair.to_string());
            }
        }
        resp
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT_LANGUAGE, self.locale);
        if let Some(cookie) = &self.cookie {
            req = req.header(header::COOKIE, cookie);
        }
        req
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let req = self
            .request(Method::GET, uri)
            .body(Body::empty())
            .expect("request build should succeed");
        self.send(req).await
    }

    /// POST a urlencoded form the way htmx does.
    pub async fn post(&mut self, uri: &str, form: &str) -> Response<Body> {
        let req = self
            .request(Method::POST, uri)
            .header("HX-Request", "true")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request build should succeed");
        self.send(req).await
    }

    /// POST, expect a redirect and return where it points.
    pub async fn post_redirect(&mut self, uri: &str, form: &str) -> String {
        let resp = self.post(uri, form).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "POST {uri}");
        location(&resp).to_string()
    }

    /// GET a page that should render, returning its HTML.
    pub async fn page(&mut self, uri: &str) -> String {
        let resp = self.get(uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        body_string(resp).await
    }
}
