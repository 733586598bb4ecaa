use std::time::Duration;

use caibao_core::CaibaoError;

use crate::FinMindConnector;
use crate::adapter::{CONNECTOR_NAME, DEFAULT_BASE_URL, RealAdapter};

/// Environment variable consulted when no token is set explicitly.
pub const TOKEN_ENV: &str = "FINMIND_API_TOKEN";

const DEFAULT_USER_AGENT: &str = concat!("caibao-finmind/", env!("CARGO_PKG_VERSION"));

/// Configures and builds a [`FinMindConnector`].
///
/// Anonymous access works but is heavily rate limited upstream; supply a token
/// explicitly or through `FINMIND_API_TOKEN`.
#[derive(Debug, Clone)]
pub struct FinMindConnectorBuilder {
    base_url: String,
    token: Option<String>,
    read_env: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    client: Option<reqwest::Client>,
}

impl Default for FinMindConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FinMindConnectorBuilder {
    /// Builder pointed at the public API, reading the token from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            read_env: true,
            timeout: None,
            user_agent: None,
            client: None,
        }
    }

    /// Override the API origin (useful for proxies and tests).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use `token` for every request. Takes precedence over the environment.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Do not fall back to `FINMIND_API_TOKEN` when no token is set.
    #[must_use]
    pub const fn ignore_env_token(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Per-request HTTP timeout. Ignored when a custom client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `User-Agent` header. Ignored when a custom client is supplied.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Reuse an existing `reqwest::Client`.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable base URL and a connector error if
    /// the HTTP client cannot be constructed.
    pub fn build(self) -> Result<FinMindConnector, CaibaoError> {
        let token = self
            .token
            .or_else(|| self.read_env.then(|| std::env::var(TOKEN_ENV).ok()).flatten());

        let http = match self.client {
            Some(c) => c,
            None => {
                let mut b = reqwest::Client::builder().user_agent(
                    self.user_agent
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                );
                if let Some(t) = self.timeout {
                    b = b.timeout(t);
                }
                b.build().map_err(|e| {
                    CaibaoError::connector(CONNECTOR_NAME, format!("http client: {e}"))
                })?
            }
        };

        let adapter = RealAdapter::new(http, &self.base_url, token)?;
        Ok(FinMindConnector::from_adapter(&adapter))
    }
}
