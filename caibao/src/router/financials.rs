use chrono::{NaiveDate, Utc};

use caibao_core::{
    CaibaoError, Capability, FinancialsReport, Stock, TimeRange, combine_series,
    stock_info_from_prices,
};

use crate::Caibao;
use crate::core::with_request_deadline;

impl Caibao {
    /// Today's calendar date in the configured market timezone.
    #[must_use]
    pub fn market_today(&self) -> NaiveDate {
        Utc::now()
            .with_timezone(&self.cfg.market_timezone)
            .date_naive()
    }

    /// Build the monthly revenue / price report for `stock` over `window`,
    /// relative to today in the market timezone.
    ///
    /// # Errors
    /// See [`Caibao::financials_on`].
    pub async fn financials(
        &self,
        stock: &Stock,
        window: TimeRange,
    ) -> Result<FinancialsReport, CaibaoError> {
        self.financials_on(stock, window, self.market_today()).await
    }

    /// Build the monthly revenue / price report for `stock` as of `today`.
    ///
    /// Behavior:
    /// - Requests `window.fetch_range(today)`, one extra year beyond the window.
    /// - Fetches revenue and prices concurrently; the first failure aborts the
    ///   other fetch and is returned. The combiner only runs when both succeed.
    /// - An empty feed yields a report with no records and a `NotFound` warning.
    ///
    /// # Errors
    /// Returns the failing fetch's error, `RequestTimeout` when the configured
    /// request deadline elapses, or `InvalidArg` if the fetch range is unrepresentable.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "caibao::router",
            skip(self, stock),
            fields(stock_id = %stock.stock_id, window = %window, today = %today),
        )
    )]
    pub async fn financials_on(
        &self,
        stock: &Stock,
        window: TimeRange,
        today: NaiveDate,
    ) -> Result<FinancialsReport, CaibaoError> {
        let range = window.fetch_range(today)?;

        let both = futures::future::try_join(
            self.monthly_revenue(stock, range),
            self.daily_prices(stock, range),
        );
        let (revenue, prices) = with_request_deadline(self.cfg.request_timeout, both)
            .await
            .map_err(|_| CaibaoError::request_timeout(Capability::Financials.as_str()))??;

        let mut warnings = Vec::new();
        if revenue.is_empty() {
            warnings.push(CaibaoError::not_found(format!(
                "monthly revenue for {} in {range}",
                stock.stock_id
            )));
        }
        if prices.is_empty() {
            warnings.push(CaibaoError::not_found(format!(
                "daily prices for {} in {range}",
                stock.stock_id
            )));
        }
        #[cfg(feature = "tracing")]
        {
            if !warnings.is_empty() {
                tracing::debug!(warnings = warnings.len(), "empty feed; report has no records");
            }
        }

        let records = combine_series(&revenue, &prices, window);
        Ok(FinancialsReport {
            stock: stock.clone(),
            window,
            range,
            records,
            stock_info: stock_info_from_prices(&prices),
            warnings,
        })
    }
}
