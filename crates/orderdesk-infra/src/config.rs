//! Configuration loading for Orderdesk.
//!
//! Credentials come from the environment and are validated once, at process
//! start: every missing variable is collected and reported together, so a
//! half-configured deployment fails fast instead of failing on the first
//! customer. The optional `config.toml` (templates, strategy, token-source
//! settings) falls back to defaults when missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use orderdesk_types::config::{AppConfig, MailConfig};
use orderdesk_types::error::ConfigError;

/// Environment variable names for the notification channel.
pub const ENV_MANAGER_EMAIL: &str = "ORDERDESK_MANAGER_EMAIL";
pub const ENV_SMTP_LOGIN: &str = "ORDERDESK_SMTP_LOGIN";
pub const ENV_SMTP_PASSWORD: &str = "ORDERDESK_SMTP_PASSWORD";
pub const ENV_SMTP_HOST: &str = "ORDERDESK_SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "ORDERDESK_SMTP_PORT";

/// Environment variable for the token-source API key (may be empty; the
/// provider then sends unauthenticated requests and the endpoint decides).
pub const ENV_API_KEY: &str = "ORDERDESK_API_KEY";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;

/// Resolve the data directory from `ORDERDESK_DATA_DIR`, falling back to
/// `~/.orderdesk`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("ORDERDESK_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".orderdesk")
        }
    }
}

/// Load the mail configuration from the process environment.
///
/// Missing required variables are a fatal startup condition.
pub fn load_mail_config() -> Result<MailConfig, ConfigError> {
    mail_config_from(|name| std::env::var(name).ok())
}

/// Load the token-source API key from the environment (empty when unset).
pub fn load_api_key() -> SecretString {
    SecretString::from(std::env::var(ENV_API_KEY).unwrap_or_default())
}

/// Build a [`MailConfig`] from an arbitrary variable lookup.
///
/// Split out from [`load_mail_config`] so tests can substitute a map for
/// the process environment.
pub fn mail_config_from<F>(get: F) -> Result<MailConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = [ENV_MANAGER_EMAIL, ENV_SMTP_LOGIN, ENV_SMTP_PASSWORD];
    let missing: Vec<String> = required
        .iter()
        .filter(|name| get(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ConfigError::MissingCredentials(missing));
    }

    let manager_email = get(ENV_MANAGER_EMAIL).unwrap_or_default();
    let smtp_login = get(ENV_SMTP_LOGIN).unwrap_or_default();
    let smtp_password = SecretString::from(get(ENV_SMTP_PASSWORD).unwrap_or_default());
    let smtp_host = get(ENV_SMTP_HOST).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

    let smtp_port = match get(ENV_SMTP_PORT) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: ENV_SMTP_PORT.to_string(),
            value: raw,
        })?,
        None => DEFAULT_SMTP_PORT,
    };

    Ok(MailConfig {
        manager_email,
        smtp_login,
        smtp_password,
        smtp_host,
        smtp_port,
    })
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - Otherwise returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_mail_config_all_present() {
        let config = mail_config_from(lookup(&[
            (ENV_MANAGER_EMAIL, "manager@example.com"),
            (ENV_SMTP_LOGIN, "orders@example.com"),
            (ENV_SMTP_PASSWORD, "app-password"),
        ]))
        .unwrap();

        assert_eq!(config.manager_email, "manager@example.com");
        assert_eq!(config.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.smtp_port, DEFAULT_SMTP_PORT);
    }

    #[test]
    fn test_mail_config_missing_lists_every_variable() {
        let err = mail_config_from(lookup(&[(ENV_MANAGER_EMAIL, "manager@example.com")]))
            .unwrap_err();

        match err {
            ConfigError::MissingCredentials(missing) => {
                assert_eq!(
                    missing,
                    vec![ENV_SMTP_LOGIN.to_string(), ENV_SMTP_PASSWORD.to_string()]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mail_config_blank_counts_as_missing() {
        let err = mail_config_from(lookup(&[
            (ENV_MANAGER_EMAIL, "   "),
            (ENV_SMTP_LOGIN, "orders@example.com"),
            (ENV_SMTP_PASSWORD, "pw"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(_)));
    }

    #[test]
    fn test_mail_config_port_override() {
        let config = mail_config_from(lookup(&[
            (ENV_MANAGER_EMAIL, "m@example.com"),
            (ENV_SMTP_LOGIN, "o@example.com"),
            (ENV_SMTP_PASSWORD, "pw"),
            (ENV_SMTP_HOST, "mail.internal"),
            (ENV_SMTP_PORT, "2465"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_host, "mail.internal");
        assert_eq!(config.smtp_port, 2465);
    }

    #[test]
    fn test_mail_config_bad_port_is_a_config_fault() {
        let err = mail_config_from(lookup(&[
            (ENV_MANAGER_EMAIL, "m@example.com"),
            (ENV_SMTP_LOGIN, "o@example.com"),
            (ENV_SMTP_PASSWORD, "pw"),
            (ENV_SMTP_PORT, "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_load_app_config_missing_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.templates.len(), 4);
    }

    #[tokio::test]
    async fn test_load_app_config_valid_toml_returns_parsed() {
        let tmp = tempfile::tempdir().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
default_strategy = "Sell shirts."

[llm]
model = "gpt-4o-mini"

[[templates]]
name = "Greeting"
text = "Hi."
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.default_strategy, "Sell shirts.");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.templates.len(), 1);
    }

    #[tokio::test]
    async fn test_load_app_config_invalid_toml_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.templates.len(), 4);
    }
}
