use std::collections::{HashMap, HashSet};
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use caibao_core::connector::ConnectorKey;
use caibao_core::{CaibaoConfig, CaibaoConnector, CaibaoError, Capability, FetchStrategy, Stock};
use chrono_tz::Tz;

/// Orchestrator that routes requests across registered providers.
pub struct Caibao {
    pub(crate) connectors: Vec<Arc<dyn CaibaoConnector>>,
    pub(crate) cfg: CaibaoConfig,
}

/// Builder for constructing a `Caibao` orchestrator with custom configuration.
pub struct CaibaoBuilder {
    connectors: Vec<Arc<dyn CaibaoConnector>>,
    cfg: CaibaoConfig,
}

impl Default for CaibaoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaibaoBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors; register at least one via [`Self::with_connector`].
    /// Defaults: priority-with-fallback fetches, 10s provider timeout, no request
    /// deadline, `Asia/Taipei` as the market timezone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: CaibaoConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order decides provider order unless [`Self::prefer_connectors`]
    /// says otherwise. Registering the same connector twice queries it twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn CaibaoConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the preferred provider order using connector instances.
    ///
    /// Listed connectors are tried first, in the given order; unlisted ones keep
    /// their registration order after them.
    #[must_use]
    pub fn prefer_connectors(mut self, connectors_desc: &[Arc<dyn CaibaoConnector>]) -> Self {
        self.cfg.connector_priority = connectors_desc.iter().map(|c| c.key()).collect();
        self
    }

    /// Set the preferred provider order using static connector keys.
    #[must_use]
    pub fn prefer_keys(mut self, keys: &[ConnectorKey]) -> Self {
        self.cfg.connector_priority = keys.to_vec();
        self
    }

    /// Select the fetch strategy for single-series requests.
    ///
    /// - `PriorityWithFallback`: tries providers in order, one at a time.
    /// - `Latency`: races every eligible provider and keeps the first success.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for fan-out operations (catalog aggregation and
    /// the concurrent revenue + price fetch). Exceeding it yields `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Timezone whose calendar date counts as "today" in [`Caibao::financials`].
    #[must_use]
    pub const fn market_timezone(mut self, tz: Tz) -> Self {
        self.cfg.market_timezone = tz;
        self
    }

    /// Build the `Caibao` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`Self::with_connector`].
    pub fn build(mut self) -> Result<Caibao, CaibaoError> {
        if self.connectors.is_empty() {
            return Err(CaibaoError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        // Drop keys of unregistered connectors and repeated keys.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let mut seen: HashSet<&'static str> = HashSet::new();
        self.cfg
            .connector_priority
            .retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));

        Ok(Caibao {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute an untagged provider error to `connector`.
pub fn tag_err(connector: &str, e: CaibaoError) -> CaibaoError {
    match e {
        e @ (CaibaoError::NotFound { .. }
        | CaibaoError::ProviderTimeout { .. }
        | CaibaoError::Connector { .. }
        | CaibaoError::RateLimited { .. }
        | CaibaoError::RequestTimeout { .. }
        | CaibaoError::AllProvidersTimedOut { .. }
        | CaibaoError::AllProvidersFailed(_)) => e,
        other => CaibaoError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, bounded by `deadline` when one is set.
///
/// On timeout returns `RequestTimeout("request")`; call sites remap the label.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, CaibaoError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| CaibaoError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Caibao {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "caibao::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, CaibaoError>
    where
        Fut: core::future::Future<Output = Result<T, CaibaoError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CaibaoError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Caibao` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use caibao::{Caibao, FetchStrategy};
    ///
    /// let finmind = Arc::new(caibao_finmind::FinMindConnector::builder().build()?);
    /// let mock = Arc::new(caibao_mock::MockConnector::new());
    ///
    /// let caibao = Caibao::builder()
    ///     .with_connector(mock.clone())
    ///     .with_connector(finmind.clone())
    ///     .prefer_connectors(&[finmind, mock])
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> CaibaoBuilder {
        CaibaoBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CaibaoConfig {
        &self.cfg
    }

    /// Registered connectors in routing order.
    pub(crate) fn ordered(&self) -> Vec<Arc<dyn CaibaoConnector>> {
        let mut out: Vec<(usize, Arc<dyn CaibaoConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        let pref = &self.cfg.connector_priority;
        if !pref.is_empty() {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-series fetch helper.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies the per-provider timeout in both modes
    /// - `NotFound` from every attempted provider collapses to one `NotFound`
    /// - If no provider exposes the capability, returns `Unsupported`
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "caibao::core::fetch_single",
            skip(self, stock, call),
            fields(stock_id = %stock.stock_id, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        stock: &Stock,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CaibaoError>
    where
        T: Send,
        F: Fn(Arc<dyn CaibaoConnector>, Stock) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CaibaoError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::PriorityWithFallback => {
                self.fetch_single_priority_with_fallback(
                    stock,
                    capability,
                    not_found_label,
                    call,
                )
                .await
            }
            FetchStrategy::Latency => {
                self.fetch_single_latency(stock, capability, not_found_label, call)
                    .await
            }
            // `FetchStrategy` is `#[non_exhaustive]`; unknown strategies use the default.
            _ => {
                self.fetch_single_priority_with_fallback(
                    stock,
                    capability,
                    not_found_label,
                    call,
                )
                .await
            }
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        stock: &Stock,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CaibaoError>
    where
        T: Send,
        F: Fn(Arc<dyn CaibaoConnector>, Stock) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CaibaoError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<CaibaoError> = Vec::new();

        for c in self.ordered() {
            let Some(fut) = call(c.clone(), stock.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability.as_str(),
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e @ (CaibaoError::NotFound { .. } | CaibaoError::ProviderTimeout { .. })) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "provider miss; falling back");
                    errors.push(e);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "provider failed; falling back");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} for {}", stock.stock_id)),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        stock: &Stock,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CaibaoError>
    where
        T: Send,
        F: Fn(Arc<dyn CaibaoConnector>, Stock) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CaibaoError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in self.ordered() {
            if let Some(fut) = call(c.clone(), stock.clone()) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability.as_str(), timeout, fut)
                            .await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<CaibaoError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(e @ (CaibaoError::ProviderTimeout { .. } | CaibaoError::NotFound { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} for {}", stock.stock_id)),
        ))
    }
}
