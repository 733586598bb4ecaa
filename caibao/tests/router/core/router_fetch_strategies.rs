use std::time::Duration;

use caibao::{Caibao, CaibaoError, FetchStrategy};
use caibao_core::PricePoint;

use crate::helpers::{MockConnector, d, range_2024, tsmc};

fn one_close(close: f64) -> Vec<PricePoint> {
    vec![PricePoint::new(d(2024, 3, 4), close)]
}

#[tokio::test]
async fn strategy_latency_returns_fastest_success() {
    let fast_ok = MockConnector::builder()
        .name("fast")
        .delay(Duration::from_millis(10))
        .returns_prices_ok(one_close(11.0))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_prices_ok(one_close(99.0))
        .build();

    let caibao = Caibao::builder()
        .with_connector(slow_ok)
        .with_connector(fast_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let px = caibao.daily_prices(&tsmc(), range_2024()).await.unwrap();
    assert_eq!(px[0].close, 11.0);
}

#[tokio::test]
async fn strategy_latency_ignores_faster_failure_and_returns_first_success() {
    let fast_fail = MockConnector::builder()
        .name("fast_fail")
        .delay(Duration::from_millis(5))
        .with_price_fn(|_s, _r| Err(CaibaoError::Other("boom".into())))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow_ok")
        .delay(Duration::from_millis(30))
        .returns_prices_ok(one_close(77.0))
        .build();

    let caibao = Caibao::builder()
        .with_connector(fast_fail)
        .with_connector(slow_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let px = caibao.daily_prices(&tsmc(), range_2024()).await.unwrap();
    assert_eq!(px[0].close, 77.0);
}

#[tokio::test]
async fn strategy_priority_with_fallback_obeys_order_and_timeout() {
    let very_slow = MockConnector::builder()
        .name("first")
        .delay(Duration::from_millis(300))
        .returns_prices_ok(one_close(1000.0))
        .build();
    let ok = MockConnector::builder()
        .name("second")
        .delay(Duration::from_millis(10))
        .returns_prices_ok(one_close(42.0))
        .build();

    let caibao = Caibao::builder()
        .with_connector(very_slow)
        .with_connector(ok)
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let px = caibao.daily_prices(&tsmc(), range_2024()).await.unwrap();
    assert_eq!(px[0].close, 42.0);
}
