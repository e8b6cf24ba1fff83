//! call-relay entry point

use std::process::ExitCode;

use clap::Parser;

use call_relay::cli::{
    app::{load_env_file, load_merged_config, run_server, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use call_relay::application::ports::ConfigStore;
use call_relay::domain::config::AppConfig;
use call_relay::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let env_file = load_env_file();
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let store = match cli.config.as_ref() {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    init_logging(cli.log_format);
    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        host: cli.host.clone(),
        port: cli.port,
        ..Default::default()
    };

    let config = match load_merged_config(&store, cli_config).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&format!("{} ({})", e, store.path().display()));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    run_server(config, &presenter).await
}
