use std::sync::Arc;

use caibao_core::{CaibaoConnector, CaibaoError, Stock};

/// Set to use the offline fixture connector instead of the FinMind API.
pub const USE_MOCK_ENV: &str = "CAIBAO_DEMOS_USE_MOCK";

/// Return a connector for demos.
///
/// # Errors
/// Returns an error if the FinMind HTTP client cannot be built.
pub fn get_connector() -> Result<Arc<dyn CaibaoConnector>, CaibaoError> {
    if std::env::var(USE_MOCK_ENV).is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(caibao_mock::MockConnector::new()))
    } else {
        let finmind = caibao_finmind::FinMindConnector::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()?;
        Ok(Arc::new(finmind))
    }
}

/// Stock named by the first CLI argument, `2330` otherwise.
#[must_use]
pub fn stock_from_args() -> Stock {
    std::env::args()
        .nth(1)
        .map_or_else(|| Stock::new("2330", "台積電"), Stock::from_id)
}

/// Install a compact `tracing` subscriber driven by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
