use clap::{Parser, builder::BoolishValueParser};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use tracxn_core::config::mask_token;
use tracxn_core::{ApiEnvironment, EndpointConfig};

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "tracxn-mcpd", version, about = "Tracxn MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "TRACXN_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(
        long,
        env = "TRACXN_PRODUCTION",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    production: bool,

    #[arg(long, env = "TRACXN_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "TRACXN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "TRACXN_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "TRACXN_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "TRACXN_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(long, env = "TRACXN_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct TracxnConfig {
    pub access_token: String,
    pub environment: ApiEnvironment,
    pub api_base_url: Option<String>,
    pub timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub log_filter: String,
}

impl fmt::Debug for TracxnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracxnConfig")
            .field("access_token", &mask_token(&self.access_token))
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("enable_stdio", &self.enable_stdio)
            .field("mcp_serve", &self.mcp_serve)
            .field("mcp_http_addr", &self.mcp_http_addr)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("no transport enabled; set TRACXN_ENABLE_STDIO or TRACXN_MCP_SERVE")]
    NoTransport,
}

impl TracxnConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Endpoint settings handed to the adapter.
    pub fn endpoint_config(&self) -> EndpointConfig {
        let config = EndpointConfig::new(self.access_token.clone(), self.environment)
            .with_timeout(self.timeout);
        match &self.api_base_url {
            Some(base_url) => config.with_base_url(base_url.clone()),
            None => config,
        }
    }
}

impl TryFrom<CliArgs> for TracxnConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let access_token = args
            .access_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingSetting("TRACXN_ACCESS_TOKEN"))?;

        let api_base_url = args
            .api_base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if let Some(url) = &api_base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidSetting {
                name: "TRACXN_API_BASE_URL",
                value: url.clone(),
            });
        }

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "TRACXN_TIMEOUT_SECS",
                value: args.timeout_secs.to_string(),
            });
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        if args.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "TRACXN_LOG",
                value: args.log_filter,
            });
        }

        let environment = if args.production {
            ApiEnvironment::Production
        } else {
            ApiEnvironment::Playground
        };

        Ok(Self {
            access_token,
            environment,
            api_base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            log_filter: args.log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            access_token: Some("abcd-secret-token-wxyz".to_string()),
            production: false,
            api_base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_stdio: true,
            mcp_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    #[test]
    fn defaults_to_playground() {
        let config = TracxnConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.environment, ApiEnvironment::Playground);
        assert_eq!(
            config.endpoint_config().base_url(),
            "https://platform.tracxn.com/api/2.2/playground"
        );
        assert_eq!(config.endpoint_config().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn production_and_override() {
        let mut args = base_args();
        args.production = true;
        let config = TracxnConfig::try_from(args).expect("config should parse");
        assert_eq!(config.endpoint_config().base_url(), "https://platform.tracxn.com/api/2.2");

        let mut args = base_args();
        args.api_base_url = Some("http://127.0.0.1:9090/".to_string());
        let config = TracxnConfig::try_from(args).expect("config should parse");
        assert_eq!(config.endpoint_config().base_url(), "http://127.0.0.1:9090");
    }

    #[test]
    fn missing_token_is_rejected() {
        let mut args = base_args();
        args.access_token = Some("   ".to_string());

        let err = TracxnConfig::try_from(args).expect_err("blank token");
        assert!(matches!(err, ConfigError::MissingSetting("TRACXN_ACCESS_TOKEN")));
    }

    #[test]
    fn rejects_bad_settings() {
        let mut args = base_args();
        args.timeout_secs = 0;
        assert!(matches!(
            TracxnConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "TRACXN_TIMEOUT_SECS", .. })
        ));

        let mut args = base_args();
        args.api_base_url = Some("platform.tracxn.com".to_string());
        assert!(matches!(
            TracxnConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "TRACXN_API_BASE_URL", .. })
        ));

        let mut args = base_args();
        args.enable_stdio = false;
        assert!(matches!(TracxnConfig::try_from(args), Err(ConfigError::NoTransport)));
    }

    #[test]
    fn debug_output_masks_token() {
        let config = TracxnConfig::try_from(base_args()).expect("config should parse");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("abcd...wxyz"));
        assert!(!rendered.contains("secret"));
    }
}
