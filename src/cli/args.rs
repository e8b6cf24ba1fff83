//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// call-relay - ring SIP phones and push call summaries to LINE
#[derive(Parser, Debug)]
#[command(name = "call-relay")]
#[command(version)]
#[command(about = "Telephony webhook server that rings SIP phones and summarizes recorded calls")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the XDG default
    #[arg(long, value_name = "FILE", env = "CALL_RELAY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Address to bind the webhook server to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Log output format
    #[arg(long, value_name = "FORMAT", env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Log line format
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "host",
    "port",
    "base_url",
    "say_language",
    "twilio.sip_domain",
    "twilio.account_sid",
    "twilio.auth_token",
    "gemini.api_key",
    "gemini.model",
    "gemini.summary_language",
    "line.notify_token",
    "line.channel_token",
    "line.user_id",
];

/// Keys whose values are masked on display
pub const SECRET_CONFIG_KEYS: &[&str] = &[
    "twilio.auth_token",
    "gemini.api_key",
    "line.notify_token",
    "line.channel_token",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

pub fn is_secret_config_key(key: &str) -> bool {
    SECRET_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["call-relay"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_host_and_port() {
        let cli = Cli::parse_from(["call-relay", "--host", "127.0.0.1", "-p", "9000"]);
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(9000));
    }

    #[test]
    fn cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["call-relay", "--port", "99999"]).is_err());
    }

    #[test]
    fn cli_parses_log_format() {
        let cli = Cli::parse_from(["call-relay", "--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["call-relay", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["call-relay", "config", "set", "twilio.sip_domain", "d.example"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "twilio.sip_domain");
            assert_eq!(value, "d.example");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["call-relay", "config", "path", "--config", "/tmp/x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("port"));
        assert!(is_valid_config_key("twilio.sip_domain"));
        assert!(is_valid_config_key("line.user_id"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn secret_keys_are_valid_keys() {
        for key in SECRET_CONFIG_KEYS {
            assert!(is_valid_config_key(key));
        }
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
