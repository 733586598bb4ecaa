use std::time::Duration;

use caibao::{Caibao, CaibaoError, FetchStrategy};
use tokio_test::assert_ok;

use crate::helpers::{MockConnector, m_catalog, m_revenue, range_2024, revenue_series, tsmc};

#[tokio::test]
async fn all_not_found_returns_not_found() {
    let nf = MockConnector::builder()
        .name("nf")
        .with_revenue_fn(|_s, _r| Err(CaibaoError::not_found("revenue")))
        .build();
    let caibao = Caibao::builder().with_connector(nf).build().unwrap();

    let err = caibao
        .monthly_revenue(&tsmc(), range_2024())
        .await
        .expect_err("should error");
    assert_eq!(err, CaibaoError::not_found("monthly revenue for 2330"));
}

#[tokio::test]
async fn not_found_does_not_block_success() {
    let nf = MockConnector::builder()
        .name("nf")
        .with_revenue_fn(|_s, _r| Err(CaibaoError::not_found("revenue")))
        .build();
    let caibao = Caibao::builder()
        .with_connector(nf)
        .with_connector(m_revenue("ok", revenue_series(2024, 1, 3, 100.0, 0.0)))
        .build()
        .unwrap();

    let got = assert_ok!(caibao.monthly_revenue(&tsmc(), range_2024()).await);
    assert_eq!(got.len(), 3);
}

#[tokio::test]
async fn no_capable_provider_is_unsupported() {
    let caibao = Caibao::builder()
        .with_connector(m_catalog("catalog_only", vec![]))
        .build()
        .unwrap();

    let err = caibao
        .daily_prices(&tsmc(), range_2024())
        .await
        .expect_err("should error");
    assert_eq!(err, CaibaoError::unsupported("daily-prices"));
}

#[tokio::test]
async fn all_timeouts_collapse() {
    for strategy in [FetchStrategy::PriorityWithFallback, FetchStrategy::Latency] {
        let slow = |name| {
            MockConnector::builder()
                .name(name)
                .delay(Duration::from_millis(200))
                .returns_revenue_ok(vec![])
                .build()
        };
        let caibao = Caibao::builder()
            .with_connector(slow("a"))
            .with_connector(slow("b"))
            .fetch_strategy(strategy)
            .provider_timeout(Duration::from_millis(20))
            .build()
            .unwrap();

        let err = caibao
            .monthly_revenue(&tsmc(), range_2024())
            .await
            .expect_err("should time out");
        assert_eq!(
            err,
            CaibaoError::AllProvidersTimedOut {
                capability: "monthly-revenue".into()
            }
        );
    }
}

#[tokio::test]
async fn mixed_failures_are_tagged_with_connector() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_revenue_fn(|_s, _r| Err(CaibaoError::Data("bad date".into())))
        .build();
    let nf = MockConnector::builder()
        .name("nf")
        .with_revenue_fn(|_s, _r| Err(CaibaoError::not_found("revenue")))
        .build();
    let caibao = Caibao::builder()
        .with_connector(broken)
        .with_connector(nf)
        .build()
        .unwrap();

    let err = caibao
        .monthly_revenue(&tsmc(), range_2024())
        .await
        .expect_err("should error");
    match err {
        CaibaoError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 2);
            assert!(matches!(
                &errs[0],
                CaibaoError::Connector { connector, .. } if connector == "broken"
            ));
            assert!(matches!(errs[1], CaibaoError::NotFound { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
