//! Configuration types for the Gitea client.
//!
//! - [`GiteaConfig`]: the settings a [`RestClient`](crate::clients::RestClient) is built from
//! - [`GiteaConfigBuilder`]: a builder for [`GiteaConfig`]
//! - [`BaseUrl`]: a validated instance URL
//! - [`AccessToken`]: a validated token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use gitea_api::{AccessToken, BaseUrl, GiteaConfig};
//!
//! let config = GiteaConfig::builder()
//!     .base_url(BaseUrl::new("https://gitea.example.com").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_path(), "/api/v1");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl};

use crate::error::ConfigError;

/// Default path of the REST API below the instance URL.
pub const DEFAULT_API_PATH: &str = "/api/v1";

/// Configuration for talking to one Gitea instance.
///
/// `GiteaConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct GiteaConfig {
    base_url: BaseUrl,
    access_token: Option<AccessToken>,
    api_path: String,
    user_agent_prefix: Option<String>,
}

impl GiteaConfig {
    /// Creates a new builder for constructing a `GiteaConfig`.
    #[must_use]
    pub fn builder() -> GiteaConfigBuilder {
        GiteaConfigBuilder::new()
    }

    /// Returns the instance base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the API path (e.g., "/api/v1").
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GiteaConfig>();
};

/// Builder for [`GiteaConfig`].
///
/// `base_url` is required. Defaults:
///
/// - `access_token`: `None` (anonymous requests)
/// - `api_path`: [`DEFAULT_API_PATH`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct GiteaConfigBuilder {
    base_url: Option<BaseUrl>,
    access_token: Option<AccessToken>,
    api_path: Option<String>,
    user_agent_prefix: Option<String>,
}

impl GiteaConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the access token sent as `Authorization: token <value>`.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Overrides the API path below the base URL.
    #[must_use]
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GiteaConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::InvalidApiPath`] if the API path is not absolute.
    pub fn build(self) -> Result<GiteaConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let api_path = match self.api_path {
            None => DEFAULT_API_PATH.to_string(),
            Some(path) => {
                let trimmed = path.trim_end_matches('/');
                if !trimmed.starts_with('/') {
                    return Err(ConfigError::InvalidApiPath { path });
                }
                trimmed.to_string()
            }
        };

        Ok(GiteaConfig {
            base_url,
            access_token: self.access_token,
            api_path,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
