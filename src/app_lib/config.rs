//! Client configuration: API base URL and session file location.
//!
//! Defaults are compiled in; `AUTHDESK_API_URL` and `AUTHDESK_SESSION_FILE`
//! override them at runtime, and CLI flags override both. Values are public;
//! do not store secrets here.

use std::{env, path::PathBuf};

/// Remote API base used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "https://os-project-server.vercel.app/auth";
pub const ENV_API_URL: &str = "AUTHDESK_API_URL";
pub const ENV_SESSION_FILE: &str = "AUTHDESK_SESSION_FILE";
/// Session file name under the config directory.
const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_path: default_session_path(),
        }
    }
}

impl AppConfig {
    /// Loads defaults and applies environment overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        apply_runtime_overrides(&mut config, runtime_config());
        config
    }

    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        if let Some(value) = normalize_runtime_value(api_base_url) {
            self.api_base_url = value;
        }
        self
    }

    #[must_use]
    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = Some(path);
        self
    }
}

/// `~/.config/authdesk/session.json`, or `None` without a home directory.
#[must_use]
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join(env!("CARGO_PKG_NAME"))
            .join(SESSION_FILE)
    })
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    session_path: Option<String>,
}

fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: env::var(ENV_API_URL)
            .ok()
            .and_then(|value| normalize_runtime_value(&value)),
        session_path: env::var(ENV_SESSION_FILE)
            .ok()
            .and_then(|value| normalize_runtime_value(&value)),
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.session_path {
        config.session_path = Some(PathBuf::from(value));
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
