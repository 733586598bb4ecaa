use caibao_core::{
    CaibaoError, Capability, CatalogReport, Stock, dedup_stocks, filter_stocks,
};

use crate::Caibao;
use crate::core::tag_err;
use crate::router::util::{collapse_errors, join_with_deadline};

impl Caibao {
    /// List every stock known to the registered catalog providers.
    ///
    /// Behavior:
    /// - Queries all catalog providers concurrently, each bounded by the provider
    ///   timeout and all of them together by the request deadline.
    /// - Concatenates results in provider order and keeps the first entry per
    ///   `stock_id`.
    /// - Nested aggregate failures are flattened. Actionable provider failures
    ///   are reported in `warnings` as long as at least one provider returned
    ///   stocks; `NotFound` and `Unsupported` answers are dropped.
    ///
    /// # Errors
    /// Returns `Unsupported` when no connector lists stocks, `RequestTimeout` when
    /// the deadline elapses, and the collapsed provider errors when nothing was
    /// listed and at least one provider failed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "caibao::router", skip(self))
    )]
    pub async fn stock_catalog(&self) -> Result<CatalogReport, CaibaoError> {
        let capability = Capability::StockCatalog;
        let call_timeout = self.cfg.provider_timeout;
        let tasks = self.ordered().into_iter().map(|c| async move {
            let name = c.name();
            match c.as_catalog_provider() {
                Some(p) => {
                    let res = Self::provider_call_with_timeout(
                        name,
                        capability.as_str(),
                        call_timeout,
                        p.stock_catalog(),
                    )
                    .await;
                    (name, true, res)
                }
                None => (name, false, Ok(Vec::new())),
            }
        });

        let joined = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| CaibaoError::request_timeout(capability.as_str()))?;

        let mut merged: Vec<Stock> = Vec::new();
        let mut errors: Vec<CaibaoError> = Vec::new();
        let mut attempted_any = false;
        for (name, attempted, res) in joined {
            if !attempted {
                continue;
            }
            attempted_any = true;
            match res {
                Ok(stocks) => merged.extend(stocks),
                Err(e @ CaibaoError::AllProvidersFailed(_)) => errors.extend(e.flatten()),
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        if !attempted_any || (merged.is_empty() && !errors.is_empty()) {
            return Err(collapse_errors(
                capability,
                attempted_any,
                errors,
                Some("stock catalog".to_string()),
            ));
        }

        // A provider with nothing to list is not worth a warning once others answered
        let warnings: Vec<CaibaoError> = errors
            .into_iter()
            .filter(CaibaoError::is_actionable)
            .collect();
        #[cfg(feature = "tracing")]
        for e in &warnings {
            tracing::warn!(error = %e, "catalog provider failed; continuing with partial list");
        }

        Ok(CatalogReport {
            stocks: dedup_stocks(merged),
            warnings,
        })
    }

    /// Stocks whose id or name contains `query` (case-insensitive), at most
    /// `limit` of them when a limit is given. An empty query lists everything.
    ///
    /// # Errors
    /// Same as [`Caibao::stock_catalog`].
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<CatalogReport, CaibaoError> {
        let CatalogReport { stocks, warnings } = self.stock_catalog().await?;
        let mut hits: Vec<Stock> = filter_stocks(&stocks, query).into_iter().cloned().collect();
        if let Some(limit) = limit {
            hits.truncate(limit);
        }
        Ok(CatalogReport {
            stocks: hits,
            warnings,
        })
    }
}
