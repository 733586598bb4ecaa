//! Configuration types shared across the orchestrator and connectors.

use std::fmt;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Typed name of a registered connector, used to express provider preference.
///
/// Keys compare by their static name, so two connector instances sharing a
/// name are indistinguishable to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(&'static str);

impl ConnectorKey {
    /// Wrap a connector's static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The connector name this key refers to.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Global configuration for the `Caibao` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaibaoConfig {
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for operations that fan out to several providers
    /// (catalog aggregation, the concurrent revenue + price fetch).
    pub request_timeout: Option<Duration>,
    /// Market timezone used to determine "today" when deriving fetch ranges.
    pub market_timezone: Tz,
    /// Preferred connector order. Unlisted connectors keep registration order
    /// and are tried after listed ones.
    #[serde(skip)]
    pub connector_priority: Vec<ConnectorKey>,
}

impl Default for CaibaoConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            market_timezone: chrono_tz::Asia::Taipei,
            connector_priority: Vec::new(),
        }
    }
}
