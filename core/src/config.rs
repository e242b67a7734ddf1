//! Construction parameters for `TempoClient`.
//!
//! A `ClientConfig` is built once and never mutated by the client. The bearer
//! token lives here and nowhere else; `Debug` output redacts it.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ApiError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tempo REST API generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    V3,
    #[default]
    V4,
}

impl ApiVersion {
    pub fn default_base_url(self) -> &'static str {
        match self {
            ApiVersion::V3 => "https://api.tempo.io/core/3",
            ApiVersion::V4 => "https://api.tempo.io/4",
        }
    }

    /// Largest `limit` the API accepts for one page.
    pub fn max_limit(self) -> u32 {
        match self {
            ApiVersion::V3 => 1000,
            ApiVersion::V4 => 5000,
        }
    }
}

/// Immutable client settings.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    version: ApiVersion,
    limit: u32,
    timeout: Duration,
    verify_tls: bool,
    proxy: Option<String>,
}

impl ClientConfig {
    /// Settings for the default API version with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::for_version(ApiVersion::default(), token)
    }

    pub fn for_version(version: ApiVersion, token: impl Into<String>) -> Self {
        Self {
            base_url: version.default_base_url().to_string(),
            token: token.into(),
            version,
            limit: version.max_limit(),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
            proxy: None,
        }
    }

    /// Read settings from `TEMPO_*` environment variables.
    ///
    /// `TEMPO_AUTH_TOKEN` is required. `TEMPO_API_VERSION` (`3` or `4`),
    /// `TEMPO_BASE_URL`, `TEMPO_PAGE_LIMIT`, `TEMPO_TIMEOUT_SECS`,
    /// `TEMPO_VERIFY_TLS` and `TEMPO_PROXY` are optional.
    pub fn from_env() -> Result<Self, ApiError> {
        let token = env::var("TEMPO_AUTH_TOKEN")
            .map_err(|_| ApiError::InvalidConfig("TEMPO_AUTH_TOKEN is not set".to_string()))?;

        let version = match env::var("TEMPO_API_VERSION").ok().as_deref() {
            None => ApiVersion::default(),
            Some("3") => ApiVersion::V3,
            Some("4") => ApiVersion::V4,
            Some(other) => {
                return Err(ApiError::InvalidConfig(format!(
                    "TEMPO_API_VERSION must be 3 or 4, got {other:?}"
                )))
            }
        };

        let mut config = Self::for_version(version, token);
        if let Ok(url) = env::var("TEMPO_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(limit) = parse_var::<u32>("TEMPO_PAGE_LIMIT")? {
            config = config.with_limit(limit);
        }
        if let Some(secs) = parse_var::<u64>("TEMPO_TIMEOUT_SECS")? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(verify) = parse_var::<bool>("TEMPO_VERIFY_TLS")? {
            config = config.with_verify_tls(verify);
        }
        if let Ok(proxy) = env::var("TEMPO_PROXY") {
            config = config.with_proxy(proxy);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Requested page size. Values above the version's maximum are capped
    /// when a request is built.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Page size actually sent: the configured limit, capped at the API
    /// maximum, and never zero.
    pub fn page_limit(&self) -> u32 {
        self.limit.clamp(1, self.version.max_limit())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("version", &self.version)
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .field("proxy", &self.proxy)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ApiError>
where
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ApiError::InvalidConfig(format!("{name}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}
