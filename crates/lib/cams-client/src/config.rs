//! Client configuration and builder.

use std::time::Duration;

use crate::error::ClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("cams-client/", env!("CARGO_PKG_VERSION"));

/// Validated configuration for [`crate::CamsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    /// Fixed platform assets catalog id. When set, the well-known-catalog
    /// lookup is answered locally instead of hitting the service; needed in
    /// air-gapped deployments where `/v2/catalogs/default` is unavailable.
    pub platform_catalog_id: Option<String>,
}

impl ClientConfig {
    /// Starts a builder with the given base URL.
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url)
    }

    /// Checks the configuration for obvious mistakes.
    ///
    /// # Errors
    /// Returns `ClientError::Config` on an empty or non-HTTP base URL.
    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::Config("base URL must not be empty".to_string()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://: {base}"
            )));
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: String,
    platform_catalog_id: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            platform_catalog_id: None,
        }
    }

    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Pins the platform assets catalog id, bypassing the service lookup.
    #[must_use]
    pub fn platform_catalog_id(mut self, id: impl Into<String>) -> Self {
        self.platform_catalog_id = Some(id.into());
        self
    }

    /// Finalizes the configuration.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if validation fails.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let config = ClientConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key: self.api_key.filter(|key| !key.trim().is_empty()),
            timeout: self.timeout,
            user_agent: self.user_agent,
            platform_catalog_id: self
                .platform_catalog_id
                .filter(|id| !id.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_trims_trailing_slash() {
        let config = ClientConfig::builder("https://cams.example.com/")
            .build()
            .expect("config should build");
        assert_eq!(config.base_url, "https://cams.example.com");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientConfig::builder("cams.example.com").build().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn blank_api_key_treated_as_absent() {
        let config = ClientConfig::builder("http://localhost:9090")
            .api_key("   ")
            .build()
            .expect("config should build");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_platform_catalog_id_treated_as_absent() {
        let config = ClientConfig::builder("http://localhost:9090")
            .platform_catalog_id("  ")
            .build()
            .expect("config should build");
        assert!(config.platform_catalog_id.is_none());

        let config = ClientConfig::builder("http://localhost:9090")
            .platform_catalog_id("platform-cat")
            .build()
            .expect("config should build");
        assert_eq!(config.platform_catalog_id.as_deref(), Some("platform-cat"));
    }
}
