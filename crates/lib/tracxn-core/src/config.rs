use std::fmt;
use std::time::Duration;

/// Root of the Tracxn REST API, version 2.2.
pub const API_ROOT: &str = "https://platform.tracxn.com/api/2.2";
/// Hard ceiling on the number of results any tool may request.
pub const MAX_RESULT_LIMIT: u32 = 20;
/// Result count used when the caller does not ask for one.
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which Tracxn deployment requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    /// Sandbox endpoint that does not consume production credits.
    #[default]
    Playground,
    Production,
}

impl ApiEnvironment {
    #[must_use]
    pub fn base_url(self) -> String {
        match self {
            Self::Playground => format!("{API_ROOT}/playground"),
            Self::Production => API_ROOT.to_string(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playground => "playground",
            Self::Production => "production",
        }
    }
}

/// Read-only endpoint settings shared by every invocation.
#[derive(Clone)]
pub struct EndpointConfig {
    environment: ApiEnvironment,
    base_url: String,
    access_token: String,
    timeout: Duration,
}

impl EndpointConfig {
    #[must_use]
    pub fn new(access_token: impl Into<String>, environment: ApiEnvironment) -> Self {
        Self {
            environment,
            base_url: environment.base_url(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the base URL, e.g. to point at a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn environment(&self) -> ApiEnvironment {
        self.environment
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an endpoint path relative to the base URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Token rendering that is safe to log or echo back to callers.
    #[must_use]
    pub fn masked_token(&self) -> String {
        mask_token(&self.access_token)
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("access_token", &self.masked_token())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Keeps the first and last four characters of a token.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
