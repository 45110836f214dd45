use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use cams_client::ClientConfig;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "cams-mcpd", version, about = "CAMS MCP daemon.")]
struct CliArgs {
    /// Base URL of the CAMS metadata catalog service.
    #[arg(long, env = "CAMS_BASE_URL")]
    base_url: String,

    /// Bearer token used to authenticate against the catalog service.
    #[arg(long, env = "CAMS_API_KEY")]
    api_key: Option<String>,

    /// Fixed platform assets catalog id. Skips the default-catalog lookup,
    /// for deployments where that endpoint is unreachable.
    #[arg(long, env = "CAMS_PLATFORM_CATALOG_ID")]
    platform_catalog_id: Option<String>,

    #[arg(
        long,
        env = "CAMS_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(long, env = "CAMS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long = "stdio",
        env = "CAMS_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "CAMS_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct CamsdConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub platform_catalog_id: Option<String>,
    pub request_timeout: Duration,
    pub mcp_http_addr: SocketAddr,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CamsdConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Client configuration derived from the daemon settings.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the builder rejects the settings.
    pub fn client_config(&self) -> Result<ClientConfig, cams_client::ClientError> {
        let mut builder =
            ClientConfig::builder(self.base_url.clone()).timeout(self.request_timeout);
        if let Some(api_key) = self.api_key.as_deref() {
            builder = builder.api_key(api_key);
        }
        if let Some(id) = self.platform_catalog_id.as_deref() {
            builder = builder.platform_catalog_id(id);
        }
        builder.build()
    }
}

impl TryFrom<CliArgs> for CamsdConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let base_url = args.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::MissingSetting("CAMS_BASE_URL"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidSetting {
                name: "CAMS_BASE_URL",
                value: base_url,
            });
        }

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "CAMS_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        if !args.mcp_serve && !args.enable_stdio {
            return Err(ConfigError::MissingSetting(
                "CAMS_MCP_SERVE or CAMS_ENABLE_STDIO",
            ));
        }

        let api_key = args.api_key.filter(|value| !value.trim().is_empty());
        let platform_catalog_id = args
            .platform_catalog_id
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            base_url,
            api_key,
            platform_catalog_id,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            mcp_http_addr: args.mcp_http_addr,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            base_url: "https://cams.example.com".to_string(),
            api_key: None,
            platform_catalog_id: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            enable_stdio: false,
            mcp_serve: true,
        }
    }

    #[test]
    fn accepts_minimal_settings() {
        let config = CamsdConfig::try_from(base_args()).expect("config should parse");
        assert_eq!(config.base_url, "https://cams.example.com");
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut args = base_args();
        args.base_url = "cams.example.com".to_string();

        let err = CamsdConfig::try_from(args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "CAMS_BASE_URL",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut args = base_args();
        args.request_timeout_secs = 0;

        let err = CamsdConfig::try_from(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }

    #[test]
    fn requires_at_least_one_transport() {
        let mut args = base_args();
        args.mcp_serve = false;
        args.enable_stdio = false;

        let err = CamsdConfig::try_from(args).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting(_)));
    }

    #[test]
    fn blank_api_key_treated_as_absent() {
        let mut args = base_args();
        args.api_key = Some("   ".to_string());

        let config = CamsdConfig::try_from(args).expect("config should parse");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn client_config_carries_settings_over() {
        let mut args = base_args();
        args.api_key = Some("token".to_string());
        args.request_timeout_secs = 5;

        let config = CamsdConfig::try_from(args).expect("config should parse");
        let client_config = config.client_config().expect("client config should build");
        assert_eq!(client_config.base_url, "https://cams.example.com");
        assert_eq!(client_config.api_key.as_deref(), Some("token"));
        assert_eq!(client_config.timeout, Duration::from_secs(5));
        assert!(client_config.platform_catalog_id.is_none());
    }

    #[test]
    fn platform_catalog_id_override_reaches_the_client_config() {
        let mut args = base_args();
        args.platform_catalog_id = Some("pinned-cat".to_string());

        let config = CamsdConfig::try_from(args).expect("config should parse");
        assert_eq!(config.platform_catalog_id.as_deref(), Some("pinned-cat"));
        let client_config = config.client_config().expect("client config should build");
        assert_eq!(
            client_config.platform_catalog_id.as_deref(),
            Some("pinned-cat")
        );
    }

    #[test]
    fn blank_platform_catalog_id_treated_as_absent() {
        let mut args = base_args();
        args.platform_catalog_id = Some("   ".to_string());

        let config = CamsdConfig::try_from(args).expect("config should parse");
        assert!(config.platform_catalog_id.is_none());
    }
}
