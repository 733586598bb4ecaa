use caibao_core::{Capability, DateRange, PricePoint, RevenueRecord, Stock};

use crate::Caibao;
use crate::caibao_router_method;

impl Caibao {
    caibao_router_method! {
        /// Fetch monthly revenue reports for `stock` published within `range`.
        ///
        /// Honors the builder's `FetchStrategy`: `PriorityWithFallback` walks the
        /// providers in order; `Latency` races them and keeps the first success.
        /// Records are returned as the provider sent them.
        method: monthly_revenue(stock: &Stock, range: DateRange) -> Vec<RevenueRecord>,
        accessor: as_revenue_provider,
        capability: Capability::MonthlyRevenue,
        not_found: "monthly revenue",
        call: monthly_revenue(stock, range)
    }

    caibao_router_method! {
        /// Fetch daily closes for `stock` within `range`.
        method: daily_prices(stock: &Stock, range: DateRange) -> Vec<PricePoint>,
        accessor: as_price_provider,
        capability: Capability::DailyPrices,
        not_found: "daily prices",
        call: daily_prices(stock, range)
    }
}
