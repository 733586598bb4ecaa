use std::sync::Arc;
use std::time::{Duration, Instant};

use caibao::{Caibao, CaibaoConnector, FetchStrategy, Stock, TimeRange};
use caibao_demos::common::init_tracing;
use caibao_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Both connectors serve fixtures; "TIMEOUT" answers after a short delay.
    let mock: Arc<dyn CaibaoConnector> = Arc::new(MockConnector::new());
    let slow_stock = Stock::from_id("TIMEOUT");

    for strategy in [FetchStrategy::PriorityWithFallback, FetchStrategy::Latency] {
        let caibao = Caibao::builder()
            .with_connector(mock.clone())
            .fetch_strategy(strategy)
            .provider_timeout(Duration::from_millis(100))
            .build()?;

        let started = Instant::now();
        match caibao.financials(&slow_stock, TimeRange::Y1).await {
            Ok(r) => println!("{strategy:?}: {} months in {:?}", r.records.len(), started.elapsed()),
            Err(e) => println!("{strategy:?}: error after {:?}: {e}", started.elapsed()),
        }
    }

    // A generous timeout lets the delayed connector answer.
    let caibao = Caibao::builder()
        .with_connector(mock)
        .provider_timeout(Duration::from_secs(1))
        .build()?;
    let r = caibao.financials(&slow_stock, TimeRange::Y1).await?;
    println!("with 1s timeout: {} months", r.records.len());
    Ok(())
}
