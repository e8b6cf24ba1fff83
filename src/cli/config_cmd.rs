//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, GeminiConfig, LineConfig, TwilioConfig};
use crate::domain::error::ConfigError;

use super::args::{is_secret_config_key, is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, display_value(key, value)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    match get_value(&config, key) {
        Some(v) => presenter.output(&display_value(key, &v)),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key)
            .map(|v| display_value(key, &v))
            .unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    let roster = config.roster();
    let destinations: Vec<String> = roster
        .destinations()
        .iter()
        .map(|d| format!("{} ({})", d.id, roster.display_name(&d.id)))
        .collect();
    presenter.key_value("destinations", &destinations.join(", "));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Read a key from the file config, as written
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let twilio = config.twilio.as_ref();
    let gemini = config.gemini.as_ref();
    let line = config.line.as_ref();

    match key {
        "host" => config.host.clone(),
        "port" => config.port.map(|p| p.to_string()),
        "base_url" => config.base_url.clone(),
        "say_language" => config.say_language.clone(),
        "twilio.sip_domain" => twilio.and_then(|t| t.sip_domain.clone()),
        "twilio.account_sid" => twilio.and_then(|t| t.account_sid.clone()),
        "twilio.auth_token" => twilio.and_then(|t| t.auth_token.clone()),
        "gemini.api_key" => gemini.and_then(|g| g.api_key.clone()),
        "gemini.model" => gemini.and_then(|g| g.model.clone()),
        "gemini.summary_language" => gemini.and_then(|g| g.summary_language.clone()),
        "line.notify_token" => line.and_then(|l| l.notify_token.clone()),
        "line.channel_token" => line.and_then(|l| l.channel_token.clone()),
        "line.user_id" => line.and_then(|l| l.user_id.clone()),
        _ => None,
    }
}

fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.to_string();

    match key {
        "host" => config.host = Some(value),
        "port" => config.port = Some(parse_port(key, &value)?),
        "base_url" => config.base_url = Some(value),
        "say_language" => config.say_language = Some(value),
        "twilio.sip_domain" => twilio(config).sip_domain = Some(value),
        "twilio.account_sid" => twilio(config).account_sid = Some(value),
        "twilio.auth_token" => twilio(config).auth_token = Some(value),
        "gemini.api_key" => gemini(config).api_key = Some(value),
        "gemini.model" => gemini(config).model = Some(value),
        "gemini.summary_language" => gemini(config).summary_language = Some(value),
        "line.notify_token" => line(config).notify_token = Some(value),
        "line.channel_token" => line(config).channel_token = Some(value),
        "line.user_id" => line(config).user_id = Some(value),
        _ => {
            return Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: "Unknown key".to_string(),
            })
        }
    }

    Ok(())
}

fn twilio(config: &mut AppConfig) -> &mut TwilioConfig {
    config.twilio.get_or_insert_with(TwilioConfig::default)
}

fn gemini(config: &mut AppConfig) -> &mut GeminiConfig {
    config.gemini.get_or_insert_with(GeminiConfig::default)
}

fn line(config: &mut AppConfig) -> &mut LineConfig {
    config.line.get_or_insert_with(LineConfig::default)
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "port" => {
            parse_port(key, value)?;
        }
        "base_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must start with http:// or https://".to_string(),
                });
            }
        }
        "twilio.sip_domain" => {
            if value.contains(':') || value.contains('@') || value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a bare domain such as example.sip.twilio.com"
                        .to_string(),
                });
            }
        }
        _ => {} // free-form strings
    }
    Ok(())
}

fn parse_port(key: &str, value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Invalid port '{}'. Expected 1-65535", value),
        }),
    }
}

fn display_value(key: &str, value: &str) -> String {
    if is_secret_config_key(key) {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn mask_secret_long() {
        assert_eq!(mask_secret("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn mask_secret_short() {
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn display_value_masks_only_secrets() {
        assert_eq!(display_value("gemini.api_key", "abcdefghijklmnop"), "abcd...mnop");
        assert_eq!(display_value("twilio.sip_domain", "d.example"), "d.example");
    }

    #[test]
    fn validate_port() {
        assert!(validate_config_value("port", "8000").is_ok());
        assert!(validate_config_value("port", "0").is_err());
        assert!(validate_config_value("port", "70000").is_err());
        assert!(validate_config_value("port", "abc").is_err());
    }

    #[test]
    fn validate_base_url() {
        assert!(validate_config_value("base_url", "https://relay.example.com").is_ok());
        assert!(validate_config_value("base_url", "relay.example.com").is_err());
    }

    #[test]
    fn validate_sip_domain() {
        assert!(validate_config_value("twilio.sip_domain", "example.sip.twilio.com").is_ok());
        assert!(validate_config_value("twilio.sip_domain", "sip:user@example.com").is_err());
    }

    #[test]
    fn set_then_get_every_key() {
        let mut config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            let value = if *key == "port" { "9000" } else { "value" };
            set_value(&mut config, key, value).unwrap();
            assert_eq!(get_value(&config, key).as_deref(), Some(value), "{}", key);
        }
    }

    #[tokio::test]
    async fn set_persists_nested_key() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "twilio.sip_domain", "d.example")
            .await
            .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.sip_domain(), Some("d.example"));
    }

    #[tokio::test]
    async fn set_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let result = handle_set(&store, &Presenter::new(), "api_key", "x").await;
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }
}
