//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::api::DEFAULT_TIMEOUT_SECS;

/// Default base URL of the artwork API.
pub const DEFAULT_API_URL: &str = "https://api.artic.edu/api/v1";

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the artwork API.
    pub api_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// The page shown on startup.
    pub start_page: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            vim_mode: true,
            start_page: 1,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api_url '{}' must start with http:// or https://",
                self.api_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.start_page == 0 {
            return Err(ConfigError::ValidationError(
                "start_page is 1-based and cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.api_url, "https://api.artic.edu/api/v1");
        assert_eq!(settings.start_page, 1);
    }

    #[test]
    fn test_empty_url_rejected() {
        let settings = Settings {
            api_url: String::new(),
            ..Default::default()
        };
        let result = settings.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("api_url cannot be empty"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let settings = Settings {
            api_url: "api.artic.edu".to_string(),
            ..Default::default()
        };
        let result = settings.validate();
        assert!(result.unwrap_err().to_string().contains("must start with http"));
    }

    #[test]
    fn test_http_url_accepted() {
        let settings = Settings {
            api_url: "http://localhost:8080".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let settings = Settings {
            start_page: 0,
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("1-based"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("vim_mode = false").unwrap();
        assert!(!settings.vim_mode);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
