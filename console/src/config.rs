//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `CONSOLE_*` environment variables or a configuration
//! file; every field is optional and falls back to a default.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::FollowLimits;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{ASSOCIATES_PATH, USERS_PATH};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PAGES: usize = 1000;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Configuration sources could not be read or merged.
    #[error("failed to load console settings: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// The API base URL does not parse.
    #[error("invalid API base URL `{value}`: {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Settings controlling how the console reaches the backend API.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONSOLE")]
pub struct ConsoleSettings {
    /// Base URL that relative API paths are resolved against.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Bearer token attached to every request.
    pub api_token: Option<String>,
    /// Path of the first associate page.
    pub associates_path: Option<String>,
    /// Path of the user creation endpoint.
    pub users_path: Option<String>,
    /// Maximum number of associate pages followed in one load.
    pub max_pages: Option<usize>,
}

impl ConsoleSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// Command-line arguments are parsed separately by the binary, so only
    /// the program name is handed to the loader.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source is malformed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("console")]).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Parsed API base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not
    /// parse as an absolute URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Bearer token, treating a blank value as absent.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Associate collection path, falling back to the default.
    pub fn associates_path(&self) -> &str {
        self.associates_path.as_deref().unwrap_or(ASSOCIATES_PATH)
    }

    /// User creation path, falling back to the default.
    pub fn users_path(&self) -> &str {
        self.users_path.as_deref().unwrap_or(USERS_PATH)
    }

    /// Page-following limits, falling back to the default ceiling.
    pub fn follow_limits(&self) -> FollowLimits {
        FollowLimits::new(self.max_pages.unwrap_or(DEFAULT_MAX_PAGES))
    }
}
