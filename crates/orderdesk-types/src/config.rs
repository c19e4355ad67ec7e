//! Configuration types for Orderdesk.
//!
//! [`AppConfig`] is the optional `config.toml` (strategy text, auto-reply
//! templates, token-source settings) -- every field has a default so the file
//! can be absent. [`MailConfig`] carries the SMTP credentials resolved from
//! the environment at startup; missing credentials are a fatal startup
//! condition, never a per-call error.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Token-source settings, mirroring the sampling knobs the pipeline forwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier to request.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

fn default_base_url() -> String {
    "https://router.huggingface.co/v1".to_string()
}

fn default_model() -> String {
    "HuggingFaceH4/zephyr-7b-beta".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.95
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// One named auto-reply template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub text: String,
}

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base system directive when the caller supplies none.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    #[serde(default)]
    pub llm: LlmConfig,

    /// Closed set of auto-reply templates, keyed by name.
    #[serde(default = "default_templates")]
    pub templates: Vec<TemplateEntry>,
}

fn default_strategy() -> String {
    "You are a polite business assistant for a custom merchandise shop.".to_string()
}

fn default_templates() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry {
            name: "Greeting".to_string(),
            text: "Hello! Welcome to our service. How can I assist you today?".to_string(),
        },
        TemplateEntry {
            name: "Pricing Info".to_string(),
            text: "Our base pricing starts from $10 per item, with a minimum order of 50 units. \
                   Discounts apply for larger orders. Would you like a quote?"
                .to_string(),
        },
        TemplateEntry {
            name: "Thank you".to_string(),
            text: "Thank you for reaching out. We look forward to helping you. Have a great day!"
                .to_string(),
        },
        TemplateEntry {
            name: "Custom T-shirt Quote".to_string(),
            text: "Sure! Please provide the number of shirts and colors in the design and we'll \
                   send you a detailed quote."
                .to_string(),
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            llm: LlmConfig::default(),
            templates: default_templates(),
        }
    }
}

/// SMTP credentials and addressing, resolved from the environment at startup.
///
/// Not serde: the password must never round-trip through a config file.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Default notification recipient (the human operator).
    pub manager_email: String,
    /// SMTP account used as the sender.
    pub smtp_login: String,
    pub smtp_password: SecretString,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert!(!config.default_strategy.is_empty());
        assert_eq!(config.templates.len(), 4);
        assert_eq!(config.llm.max_tokens, 1024);
        assert!((config.llm.top_p - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_app_config_deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.templates.len(), 4);
        assert_eq!(config.llm.model, "HuggingFaceH4/zephyr-7b-beta");
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
default_strategy = "You are a terse assistant."

[llm]
model = "gpt-4o-mini"
max_tokens = 512

[[templates]]
name = "Greeting"
text = "Hi there."
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_strategy, "You are a terse assistant.");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 512);
        // Partial [llm] tables still fill the remaining fields.
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.templates.len(), 1);
    }

    #[test]
    fn test_app_config_serde_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.templates.len(), config.templates.len());
        assert_eq!(parsed.llm.model, config.llm.model);
    }

    #[test]
    fn test_default_template_names_are_unique() {
        let templates = default_templates();
        let mut names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), templates.len());
    }
}
