use axum::http::{header::InvalidHeaderValue, HeaderValue};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{name}={value}; Max-Age=31536000; Path=/; SameSite=Lax{secure}"
    ))
}
