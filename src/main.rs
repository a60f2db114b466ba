use std::time::Duration;

use clap::Parser;
use flagquiz::{ai::GeminiClient, services::game::GameService, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Gemini API key.
    #[arg(long, env, hide_env_values = true)]
    gemini_api_key: String,

    /// Gemini model used for every prompt.
    #[arg(long, env, default_value = flagquiz::ai::DEFAULT_MODEL)]
    gemini_model: String,

    /// Base URL of the Gemini REST API.
    #[arg(long, env, default_value = flagquiz::ai::DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// Timeout for a single AI request, in seconds.
    #[arg(long, env, default_value_t = 30)]
    ai_timeout_secs: u64,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:5000")]
    address: String,

    /// Mark cookies as `Secure` (serve over HTTPS).
    #[arg(long, env)]
    secure_cookies: bool,

    /// Minutes of inactivity after which a session expires.
    #[arg(long, env, default_value_t = 60)]
    session_idle_minutes: i64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,flagquiz=debug,tower_sessions=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let ai = GeminiClient::new(
        args.gemini_api_key,
        args.gemini_model,
        args.gemini_base_url,
        Duration::from_secs(args.ai_timeout_secs),
    )?;
    let routes = flagquiz::router(AppState {
        game: GameService::new(ai),
        secure_cookies: args.secure_cookies,
        session_idle_minutes: args.session_idle_minutes,
    });

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on http://{address}");
    axum::serve(listener, routes).await?;

    Ok(())
}
