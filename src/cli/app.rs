//! Server runner and configuration loading

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::application::ports::ConfigStore;
use crate::application::RecordingAnalysisUseCase;
use crate::domain::config::{AppConfig, GeminiConfig, LineConfig, TwilioConfig};
use crate::domain::error::ConfigError;
use crate::domain::summary::SummaryPrompt;
use crate::http::{create_router, AppState};
use crate::infrastructure::{
    create_notifier, GeminiSummarizer, HttpRecordingFetcher, TaskTrackerDispatcher,
};

use super::presenter::Presenter;
use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load `.env` into the process environment.
///
/// Must run before argument parsing so clap's `env` fallbacks and
/// `RUST_LOG` see the file. Existing variables win.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;
    let env_config = config_from_env(|name| env::var(name).ok());

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config))
}

/// Build a partial config from environment variables.
///
/// Blank values count as unset.
pub fn config_from_env<F>(lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let port = var("PORT").and_then(|raw| match raw.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(value = %raw, "Ignoring invalid PORT");
            None
        }
    });

    let twilio = TwilioConfig {
        sip_domain: var("TWILIO_SIP_DOMAIN"),
        account_sid: var("TWILIO_ACCOUNT_SID"),
        auth_token: var("TWILIO_AUTH_TOKEN"),
    };
    let gemini = GeminiConfig {
        api_key: var("GOOGLE_API_KEY").or_else(|| var("GEMINI_API_KEY")),
        model: var("GEMINI_MODEL"),
        summary_language: var("SUMMARY_LANGUAGE"),
    };
    let line = LineConfig {
        notify_token: var("LINE_NOTIFY_TOKEN"),
        channel_token: var("LINE_CHANNEL_ACCESS_TOKEN"),
        user_id: var("LINE_USER_ID"),
    };

    AppConfig {
        host: var("HOST"),
        port,
        base_url: var("BASE_URL"),
        say_language: var("SAY_LANGUAGE"),
        twilio: Some(twilio).filter(|t| *t != TwilioConfig::default()),
        gemini: Some(gemini).filter(|g| *g != GeminiConfig::default()),
        line: Some(line).filter(|l| *l != LineConfig::default()),
        destinations: None,
    }
}

/// Wire adapters into the webhook server and run until a shutdown signal
pub async fn run_server(config: AppConfig, presenter: &Presenter) -> ExitCode {
    let notifier = match create_notifier(&config) {
        Ok(notifier) => notifier,
        Err(e) => {
            presenter.error(&format!("Failed to create notifier: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let fetcher = match HttpRecordingFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            presenter.error(&format!("Failed to create HTTP client: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let fetcher = match config.twilio_credentials() {
        Some((account_sid, auth_token)) => fetcher.with_basic_auth(account_sid, auth_token),
        None => fetcher,
    };

    if config.sip_domain().is_none() {
        warn!("TWILIO_SIP_DOMAIN is not set; inbound calls will hear an error message");
    }
    if config.gemini_api_key().is_none() {
        warn!("GOOGLE_API_KEY is not set; recorded calls will report an error instead of a summary");
    }

    let summarizer = GeminiSummarizer::with_model(
        config.gemini_api_key().unwrap_or_default(),
        config.gemini_model_or_default(),
    );
    let analyzer = Arc::new(RecordingAnalysisUseCase::new(
        fetcher,
        summarizer,
        Arc::clone(&notifier),
        SummaryPrompt::build(config.summary_language_or_default()),
    ));
    let dispatcher = TaskTrackerDispatcher::new(analyzer);

    let state = Arc::new(AppState::new(
        &config,
        notifier,
        Arc::new(dispatcher.clone()),
    ));
    let app = create_router(state);

    let address = format!("{}:{}", config.host_or_default(), config.port_or_default());
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            presenter.error(&format!("Failed to bind {}: {}", address, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.listening(&address);
    info!(address = %address, destinations = config.roster().len(), "Webhook server started");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        return ExitCode::from(EXIT_ERROR);
    }

    dispatcher.shutdown().await;
    info!("Shutdown complete");

    ExitCode::from(EXIT_SUCCESS)
}
