use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use caibao_core::connector::{CaibaoConnector, CatalogProvider, PriceProvider, RevenueProvider};
use caibao_core::{Capability, CaibaoError, DateRange, PricePoint, RevenueRecord, Stock};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(CaibaoError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    revenue_rules: HashMap<String, MockBehavior<Vec<RevenueRecord>>>,
    price_rules: HashMap<String, MockBehavior<Vec<PricePoint>>>,
    catalog_rule: Option<MockBehavior<Vec<Stock>>>,
    requests: Vec<(Capability, Option<String>, Option<DateRange>)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `monthly_revenue` calls for a specific stock id.
    pub async fn set_revenue_behavior(
        &self,
        stock_id: impl Into<String>,
        behavior: MockBehavior<Vec<RevenueRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.revenue_rules.insert(stock_id.into(), behavior);
    }

    /// Set the behavior for `daily_prices` calls for a specific stock id.
    pub async fn set_price_behavior(
        &self,
        stock_id: impl Into<String>,
        behavior: MockBehavior<Vec<PricePoint>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.price_rules.insert(stock_id.into(), behavior);
    }

    /// Set the behavior for `stock_catalog` calls.
    pub async fn set_catalog_behavior(&self, behavior: MockBehavior<Vec<Stock>>) {
        let mut guard = self.state.lock().await;
        guard.catalog_rule = Some(behavior);
    }

    /// Number of calls made for `capability` so far.
    pub async fn call_count(&self, capability: Capability) -> usize {
        let guard = self.state.lock().await;
        guard
            .requests
            .iter()
            .filter(|(c, _, _)| *c == capability)
            .count()
    }

    /// Date ranges requested for `capability`, in call order.
    pub async fn requested_ranges(&self, capability: Capability) -> Vec<DateRange> {
        let guard = self.state.lock().await;
        guard
            .requests
            .iter()
            .filter(|(c, _, _)| *c == capability)
            .filter_map(|(_, _, r)| *r)
            .collect()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.revenue_rules.clear();
        guard.price_rules.clear();
        guard.catalog_rule = None;
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn CaibaoConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn CaibaoConnector>, controller)
    }

    async fn resolve<T: Clone>(
        &self,
        capability: Capability,
        stock_id: Option<&str>,
        range: Option<DateRange>,
        pick: impl FnOnce(&InternalState) -> Option<MockBehavior<T>>,
    ) -> Result<T, CaibaoError> {
        // Snapshot the rule without holding the lock across the hang
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .requests
                .push((capability, stock_id.map(str::to_string), range));
            pick(&guard)
        };

        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(CaibaoError::unsupported(capability.as_str())),
        }
    }
}

#[async_trait]
impl CaibaoConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_revenue_provider(&self) -> Option<&dyn RevenueProvider> {
        Some(self as &dyn RevenueProvider)
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }
}

#[async_trait]
impl RevenueProvider for DynamicMockConnector {
    async fn monthly_revenue(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>, CaibaoError> {
        let id = stock.stock_id.as_str();
        self.resolve(Capability::MonthlyRevenue, Some(id), Some(range), |s| {
            s.revenue_rules.get(id).cloned()
        })
        .await
    }
}

#[async_trait]
impl PriceProvider for DynamicMockConnector {
    async fn daily_prices(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, CaibaoError> {
        let id = stock.stock_id.as_str();
        self.resolve(Capability::DailyPrices, Some(id), Some(range), |s| {
            s.price_rules.get(id).cloned()
        })
        .await
    }
}

#[async_trait]
impl CatalogProvider for DynamicMockConnector {
    async fn stock_catalog(&self) -> Result<Vec<Stock>, CaibaoError> {
        self.resolve(Capability::StockCatalog, None, None, |s| {
            s.catalog_rule.clone()
        })
        .await
    }
}
