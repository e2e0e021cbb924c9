use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{AppError, Result};

/// Environment prefix for nested overrides, e.g. `WATCHDOG__API__TOKEN`.
const ENV_PREFIX: &str = "WATCHDOG";

/// Flat variable names accepted alongside the prefixed form.
///
/// Earlier entries win when two names map to the same key, so
/// `TELEGRAM_TOKEN` takes precedence over the bare `TOKEN`.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("PRACTICUM_TOKEN", "api.token"),
    ("TELEGRAM_TOKEN", "telegram.token"),
    ("TOKEN", "telegram.token"),
    ("TELEGRAM_CHAT_ID", "telegram.chat_id"),
];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            endpoint: default_endpoint(),
            auth_scheme: default_auth_scheme(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("auth_scheme", &self.auth_scheme)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TelegramConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Manual Debug impl to avoid leaking the bot token
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_auth_scheme() -> String {
    "OAuth".to_string()
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from an optional file and the process environment.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with_env(config_path, std::env::vars().collect())
    }

    /// Same as [`AppConfig::load`], reading overrides from `env` instead of
    /// the process environment.
    pub fn load_with_env(config_path: Option<&str>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("review-watchdog").required(false));
        }

        let mut env = env;
        for (var, key) in LEGACY_ENV {
            let Some(value) = env.get(var).filter(|v| !v.trim().is_empty()).cloned() else {
                continue;
            };
            let prefixed = format!("{ENV_PREFIX}__{}", key.replace('.', "__").to_uppercase());
            // Prefixed variables win over the legacy names
            env.entry(prefixed).or_insert(value);
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Names of required values that are absent or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let required = [
            ("api.token", &self.api.token),
            ("telegram.token", &self.telegram.token),
            ("telegram.chat_id", &self.telegram.chat_id),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Startup gate: every credential must be present before polling begins.
    pub fn ensure_credentials(&self) -> Result<()> {
        let missing = self.missing_credentials();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingCredentials(missing))
        }
    }
}
