use crate::{
    app_lib::{ApiClient, AppConfig},
    features::auth::state::{FileStore, Session},
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: Option<String>, session_file: Option<PathBuf>) -> Self {
        Self {
            api_url,
            session_file,
        }
    }

    /// Environment defaults overridden by the command line.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::load();
        if let Some(api_url) = &self.api_url {
            config = config.with_api_base_url(api_url);
        }
        if let Some(path) = &self.session_file {
            config = config.with_session_path(path.clone());
        }
        config
    }

    /// Session backed by the configured file, or memory when no home
    /// directory is available.
    #[must_use]
    pub fn session(&self, config: &AppConfig) -> Session {
        match &config.session_path {
            Some(path) => {
                debug!("using session file {}", path.display());
                Session::new(FileStore::new(path))
            }
            None => {
                warn!("no session file location, the session will not be kept");
                Session::in_memory()
            }
        }
    }

    /// # Errors
    /// Returns an error if the configured API base URL is invalid.
    pub fn api_client(&self) -> Result<ApiClient> {
        let config = self.config();
        let session = self.session(&config);
        ApiClient::new(&config, session).context("failed to create API client")
    }
}
